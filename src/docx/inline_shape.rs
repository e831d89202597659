//! Inline shapes: graphical objects anchored in the text flow of the body.
//!
//! A shape is found wherever a `w:drawing` wraps a `wp:inline` anchor. The
//! anchor's `a:graphic/a:graphicData` payload decides what the shape is:
//!
//! ```xml
//! <w:drawing>
//!   <wp:inline>
//!     <wp:extent cx="914400" cy="914400"/>
//!     <wp:docPr id="1" name="Picture 1"/>
//!     <a:graphic>
//!       <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">
//!         <pic:pic>... <a:blip r:embed="rId4"/> ...</pic:pic>
//!       </a:graphicData>
//!     </a:graphic>
//!   </wp:inline>
//! </w:drawing>
//! ```

use super::constants::{
    NS_A, NS_MC, NS_R, NS_W, NS_WP, URI_CHART, URI_DIAGRAM, URI_OLE, URI_PICTURE,
};
use super::document::Document;
use crate::error::{Error, Result};
use crate::model::ImagePart;
use crate::xml::{NodeId, XmlTree};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an inline shape.
///
/// Discriminants are the values Word's object model uses for the same
/// shape types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum InlineShapeType {
    /// Embedded OLE object
    EmbeddedOleObject = 1,
    /// Picture stored in the package
    Picture = 3,
    /// Picture referenced by an external link only
    LinkedPicture = 4,
    /// Chart
    Chart = 12,
    /// SmartArt diagram
    SmartArt = 15,
    /// Anything else anchored inline
    NotImplemented = -6,
}

impl InlineShapeType {
    /// Word object-model value of this type.
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Upper-case name as used by Word's `WdInlineShapeType`.
    pub fn name(self) -> &'static str {
        match self {
            InlineShapeType::EmbeddedOleObject => "EMBEDDED_OLE_OBJECT",
            InlineShapeType::Picture => "PICTURE",
            InlineShapeType::LinkedPicture => "LINKED_PICTURE",
            InlineShapeType::Chart => "CHART",
            InlineShapeType::SmartArt => "SMART_ART",
            InlineShapeType::NotImplemented => "NOT_IMPLEMENTED",
        }
    }
}

impl fmt::Display for InlineShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an inline shape is, with the relationship ids its variant carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InlineShapeKind {
    /// Picture with an embedded image. A link reference may sit alongside.
    Picture {
        embed: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    /// Picture whose image is only linked.
    LinkedPicture { link: String },
    /// SmartArt diagram; `data_model` is the `r:dm` relationship.
    SmartArt {
        #[serde(skip_serializing_if = "Option::is_none")]
        data_model: Option<String>,
    },
    /// Chart; `chart` is the chart part relationship.
    Chart {
        #[serde(skip_serializing_if = "Option::is_none")]
        chart: Option<String>,
    },
    /// Embedded OLE object.
    EmbeddedOleObject {
        #[serde(skip_serializing_if = "Option::is_none")]
        object: Option<String>,
    },
    /// Unrecognised graphic payload.
    NotImplemented {
        #[serde(skip_serializing_if = "Option::is_none")]
        uri: Option<String>,
    },
}

impl InlineShapeKind {
    /// Classify a `wp:inline` node.
    ///
    /// Never fails: anything without a recognised graphic payload is
    /// `NotImplemented`. Relationship attributes are matched by namespace,
    /// so `r:embed` is found under whatever prefix the producer bound.
    pub fn classify(tree: &XmlTree, inline: NodeId) -> Self {
        let Some(graphic_data) = tree.find_ns_path(inline, NS_A, &["graphic", "graphicData"]) else {
            return InlineShapeKind::NotImplemented { uri: None };
        };
        let uri = tree.attr(graphic_data, "uri");
        let rel_attr = |path: &[&str], key: &str| -> Option<String> {
            tree.find_local_path(graphic_data, path)
                .and_then(|node| tree.attr_ns(node, NS_R, key))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match uri {
            Some(URI_PICTURE) => {
                let embed = rel_attr(&["pic", "blipFill", "blip"], "embed");
                let link = rel_attr(&["pic", "blipFill", "blip"], "link");
                match (embed, link) {
                    // embed wins when both references are present
                    (Some(embed), link) => InlineShapeKind::Picture { embed, link },
                    (None, Some(link)) => InlineShapeKind::LinkedPicture { link },
                    (None, None) => InlineShapeKind::NotImplemented {
                        uri: uri.map(str::to_string),
                    },
                }
            }
            Some(URI_CHART) => InlineShapeKind::Chart {
                chart: rel_attr(&["chart"], "id"),
            },
            Some(URI_DIAGRAM) => InlineShapeKind::SmartArt {
                data_model: rel_attr(&["relIds"], "dm"),
            },
            Some(URI_OLE) => InlineShapeKind::EmbeddedOleObject {
                object: rel_attr(&["oleObj"], "id"),
            },
            other => InlineShapeKind::NotImplemented {
                uri: other.map(str::to_string),
            },
        }
    }

    /// The closed type of this kind.
    pub fn shape_type(&self) -> InlineShapeType {
        match self {
            InlineShapeKind::Picture { .. } => InlineShapeType::Picture,
            InlineShapeKind::LinkedPicture { .. } => InlineShapeType::LinkedPicture,
            InlineShapeKind::SmartArt { .. } => InlineShapeType::SmartArt,
            InlineShapeKind::Chart { .. } => InlineShapeType::Chart,
            InlineShapeKind::EmbeddedOleObject { .. } => InlineShapeType::EmbeddedOleObject,
            InlineShapeKind::NotImplemented { .. } => InlineShapeType::NotImplemented,
        }
    }

    /// The main relationship id of the variant, if it has one.
    pub fn relationship_id(&self) -> Option<&str> {
        match self {
            InlineShapeKind::Picture { embed, .. } => Some(embed),
            InlineShapeKind::LinkedPicture { link } => Some(link),
            InlineShapeKind::SmartArt { data_model } => data_model.as_deref(),
            InlineShapeKind::Chart { chart } => chart.as_deref(),
            InlineShapeKind::EmbeddedOleObject { object } => object.as_deref(),
            InlineShapeKind::NotImplemented { .. } => None,
        }
    }
}

/// One graphical object anchored inline in the body.
///
/// Borrowing the [`Document`] keeps the shape valid: the document cannot be
/// edited while any shape or collection derived from it is alive.
#[derive(Debug, Clone)]
pub struct InlineShape<'a> {
    document: &'a Document,
    node: NodeId,
    kind: InlineShapeKind,
}

impl<'a> InlineShape<'a> {
    pub(crate) fn from_node(document: &'a Document, node: NodeId) -> Self {
        let kind = InlineShapeKind::classify(document.tree(), node);
        Self {
            document,
            node,
            kind,
        }
    }

    /// Handle of the `wp:inline` node in the document tree.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Closed classification of the shape.
    pub fn shape_type(&self) -> InlineShapeType {
        self.kind.shape_type()
    }

    /// Classification together with the relationship ids it carries.
    pub fn kind(&self) -> &InlineShapeKind {
        &self.kind
    }

    /// Relationship id of an embedded picture.
    pub fn embed_rid(&self) -> Option<&str> {
        match &self.kind {
            InlineShapeKind::Picture { embed, .. } => Some(embed),
            _ => None,
        }
    }

    /// Relationship id of a linked picture, including the link kept next to an embed.
    pub fn link_rid(&self) -> Option<&str> {
        match &self.kind {
            InlineShapeKind::Picture { link, .. } => link.as_deref(),
            InlineShapeKind::LinkedPicture { link } => Some(link),
            _ => None,
        }
    }

    /// Main relationship id of the shape's payload.
    pub fn relationship_id(&self) -> Option<&str> {
        self.kind.relationship_id()
    }

    /// External target of the picture link, if any.
    pub fn link_target(&self) -> Option<&'a str> {
        let link = self.link_rid()?;
        self.document
            .relationships()
            .get(link)
            .map(|rel| rel.target.as_str())
    }

    /// The image bytes behind a picture.
    ///
    /// Linked-only pictures fail with [`Error::ExternalRelationship`];
    /// other shape types fail with [`Error::NoPayload`].
    pub fn image(&self) -> Result<ImagePart> {
        let r_id = self
            .embed_rid()
            .or_else(|| self.link_rid())
            .ok_or(Error::NoPayload("image"))?;
        self.document.related_part(r_id)
    }

    /// Width in EMUs from `wp:extent`.
    pub fn width(&self) -> Option<i64> {
        self.extent_attr("cx")
    }

    /// Height in EMUs from `wp:extent`.
    pub fn height(&self) -> Option<i64> {
        self.extent_attr("cy")
    }

    /// `wp:docPr/@id`.
    pub fn id(&self) -> Option<u32> {
        self.doc_pr_attr("id").and_then(|v| v.parse().ok())
    }

    /// `wp:docPr/@name`.
    pub fn name(&self) -> Option<&'a str> {
        self.doc_pr_attr("name")
    }

    /// Alt text (`wp:docPr/@descr`).
    pub fn description(&self) -> Option<&'a str> {
        self.doc_pr_attr("descr").filter(|d| !d.is_empty())
    }

    fn extent_attr(&self, key: &str) -> Option<i64> {
        let tree = self.document.tree();
        tree.child_ns(self.node, NS_WP, "extent")
            .and_then(|extent| tree.attr(extent, key))
            .and_then(|v| v.parse().ok())
    }

    fn doc_pr_attr(&self, key: &str) -> Option<&'a str> {
        let tree: &'a XmlTree = self.document.tree();
        tree.child_ns(self.node, NS_WP, "docPr")
            .and_then(|doc_pr| tree.attr(doc_pr, key))
    }
}

impl PartialEq for InlineShape<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.node == other.node
    }
}

impl Eq for InlineShape<'_> {}

/// The inline shapes of a document body, in document order.
///
/// Built once by scanning the tree: later changes to the document are not
/// reflected, and the borrow on the document rules them out while the
/// collection exists.
#[derive(Debug, Clone)]
pub struct InlineShapes<'a> {
    shapes: Vec<InlineShape<'a>>,
}

impl<'a> InlineShapes<'a> {
    /// Index every inline shape anchor in the body of `document`.
    pub fn new(document: &'a Document) -> Self {
        let tree = document.tree();
        let body = tree.root().and_then(|root| tree.child_ns(root, NS_W, "body"));
        let Some(body) = body else {
            tracing::debug!("document has no body; no inline shapes");
            return Self { shapes: Vec::new() };
        };

        let shapes: Vec<_> = tree
            .descendants(body)
            .filter(|&id| {
                tree.is_ns(id, NS_WP, "inline")
                    && tree.parent(id).is_some_and(|p| tree.is_ns(p, NS_W, "drawing"))
                    && !tree.has_ancestor_ns(id, NS_MC, "Fallback", body)
            })
            .map(|id| InlineShape::from_node(document, id))
            .collect();

        tracing::debug!(count = shapes.len(), "indexed inline shapes");
        Self { shapes }
    }

    /// Number of inline shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the body has no inline shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shape at `index`.
    pub fn get(&self, index: usize) -> Result<&InlineShape<'a>> {
        self.shapes.get(index).ok_or(Error::IndexOutOfRange {
            index: isize::try_from(index).unwrap_or(isize::MAX),
            len: self.shapes.len(),
        })
    }

    /// Shape at a signed `index`; negative indices are out of range.
    pub fn get_signed(&self, index: isize) -> Result<&InlineShape<'a>> {
        match usize::try_from(index) {
            Ok(i) => self.get(i),
            Err(_) => Err(Error::IndexOutOfRange {
                index,
                len: self.shapes.len(),
            }),
        }
    }

    /// Iterate shapes in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, InlineShape<'a>> {
        self.shapes.iter()
    }
}

impl<'a> std::ops::Index<usize> for InlineShapes<'a> {
    type Output = InlineShape<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.shapes[index]
    }
}

impl<'s, 'a> IntoIterator for &'s InlineShapes<'a> {
    type Item = &'s InlineShape<'a>;
    type IntoIter = std::slice::Iter<'s, InlineShape<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

impl<'a> IntoIterator for InlineShapes<'a> {
    type Item = InlineShape<'a>;
    type IntoIter = std::vec::IntoIter<InlineShape<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.into_iter()
    }
}

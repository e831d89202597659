//! Arena-backed element tree for package XML parts.
//!
//! Nodes live in a single `Vec` and are addressed by [`NodeId`]. Ids are
//! never reused or invalidated: new nodes are only ever appended to the
//! arena, so a handle taken before an insertion still points at the same
//! node afterwards.

use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Serialize;

/// The `xml` prefix is bound by definition and never declared.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

fn split_qname(name: &str) -> (&str, &str) {
    name.split_once(':').unwrap_or(("", name))
}

/// Handle to a node inside an [`XmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

/// Payload of a tree node.
#[derive(Debug, Clone, PartialEq)]
enum NodeData {
    /// An element with its qualified name and attributes in source order.
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// Character data (already unescaped).
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed XML document.
///
/// Element and attribute names are kept exactly as written (`w:p`,
/// `r:embed`) so a rewrite reproduces the source. Lookups that must not
/// depend on the prefix a producer chose go through the `*_ns` methods,
/// which resolve prefixes against the `xmlns` declarations in scope.
#[derive(Debug, Clone, Default)]
pub struct XmlTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl XmlTree {
    /// Parse an XML string into a tree.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut tree = XmlTree::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        // Keep whitespace so `xml:space="preserve"` runs survive a rewrite.
        reader.config_mut().trim_text(false);

        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let id = tree.push_element(stack.last().copied(), e)?;
                    stack.push(id);
                }
                Ok(Event::Empty(ref e)) => {
                    tree.push_element(stack.last().copied(), e)?;
                }
                Ok(Event::End(_)) => {
                    if stack.pop().is_none() {
                        return Err(Error::XmlParse("unbalanced end tag".to_string()));
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(&parent) = stack.last() {
                        let text = e.unescape()?.into_owned();
                        if !text.is_empty() {
                            tree.push_node(Some(parent), NodeData::Text(text));
                        }
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(&parent) = stack.last() {
                        let text = String::from_utf8_lossy(e).into_owned();
                        tree.push_node(Some(parent), NodeData::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                // Declarations, comments and processing instructions are dropped.
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::XmlParse("unexpected end of document".to_string()));
        }
        if tree.root.is_none() {
            return Err(Error::XmlParse("document has no root element".to_string()));
        }

        Ok(tree)
    }

    fn push_element(&mut self, parent: Option<NodeId>, e: &BytesStart<'_>) -> Result<NodeId> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(self.push_node(parent, NodeData::Element { name, attributes }))
    }

    fn push_node(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
        id
    }

    /// The document element.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Qualified name of an element node, `None` for text.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { name, .. } => Some(name),
            NodeData::Text(_) => None,
        }
    }

    /// Whether the node is an element with the given qualified name.
    pub fn is(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == Some(name)
    }

    /// Attribute value by qualified key.
    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            NodeData::Text(_) => None,
        }
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Direct children, elements and text alike.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// First child element whose local name matches, whatever its prefix.
    pub fn child_local(&self, id: NodeId, local: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.name(c).map(super::local_name) == Some(local))
    }

    /// Follow a chain of child local names.
    pub fn find_local_path(&self, id: NodeId, path: &[&str]) -> Option<NodeId> {
        path.iter().try_fold(id, |node, local| self.child_local(node, local))
    }

    /// Namespace URI bound to `prefix` at `id`, searching the element and
    /// its ancestors for the nearest `xmlns` declaration.
    ///
    /// An empty prefix looks up the default namespace. `xmlns=""` undeclares
    /// it, so that resolves to `None` as well.
    pub fn namespace_for(&self, id: NodeId, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        let mut current = Some(id);
        while let Some(node) = current {
            if let NodeData::Element { attributes, .. } = &self.nodes[node.0].data {
                let declared = attributes.iter().find(|(k, _)| match k.strip_prefix("xmlns") {
                    Some("") => prefix.is_empty(),
                    Some(rest) => rest.strip_prefix(':') == Some(prefix),
                    None => false,
                });
                if let Some((_, uri)) = declared {
                    return Some(uri.as_str()).filter(|uri| !uri.is_empty());
                }
            }
            current = self.parent(node);
        }
        None
    }

    /// Whether the node is an element named `local` in namespace `ns`,
    /// whatever prefix the document bound to it.
    pub fn is_ns(&self, id: NodeId, ns: &str, local: &str) -> bool {
        let Some(name) = self.name(id) else {
            return false;
        };
        let (prefix, name_local) = split_qname(name);
        name_local == local && self.namespace_for(id, prefix) == Some(ns)
    }

    /// First child element named `local` in namespace `ns`.
    pub fn child_ns(&self, id: NodeId, ns: &str, local: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.is_ns(c, ns, local))
    }

    /// Follow a chain of child local names, all in namespace `ns`.
    pub fn find_ns_path(&self, id: NodeId, ns: &str, path: &[&str]) -> Option<NodeId> {
        path.iter().try_fold(id, |node, local| self.child_ns(node, ns, local))
    }

    /// Value of the attribute named `local` in namespace `ns`.
    ///
    /// Unprefixed attributes belong to no namespace and never match.
    pub fn attr_ns(&self, id: NodeId, ns: &str, local: &str) -> Option<&str> {
        let NodeData::Element { attributes, .. } = &self.nodes[id.0].data else {
            return None;
        };
        attributes
            .iter()
            .find(|(key, _)| match key.split_once(':') {
                Some(("xmlns", _)) | None => false,
                Some((prefix, key_local)) => {
                    key_local == local && self.namespace_for(id, prefix) == Some(ns)
                }
            })
            .map(|(_, v)| v.as_str())
    }

    /// Whether any ancestor of `id` (exclusive) up to `stop` (exclusive) is
    /// the element `local` in namespace `ns`.
    pub fn has_ancestor_ns(&self, id: NodeId, ns: &str, local: &str, stop: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == stop {
                return false;
            }
            if self.is_ns(node, ns, local) {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Pre-order (document order) iterator over the descendants of `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Append a new element as the last child of `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> NodeId {
        let data = NodeData::Element {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        self.push_node(Some(parent), data)
    }

    /// Copy the whole of `fragment` under `parent` at child position `position`.
    ///
    /// Returns the id the fragment's root received in this tree.
    pub fn graft(&mut self, parent: NodeId, position: usize, fragment: &XmlTree) -> Result<NodeId> {
        let source_root = fragment
            .root
            .ok_or_else(|| Error::XmlParse("fragment has no root element".to_string()))?;

        let new_root = self.copy_detached(fragment, source_root, parent);
        let children = &mut self.nodes[parent.0].children;
        let position = position.min(children.len());
        children.insert(position, new_root);
        Ok(new_root)
    }

    fn copy_detached(&mut self, fragment: &XmlTree, source: NodeId, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data: fragment.nodes[source.0].data.clone(),
            parent: Some(parent),
            children: Vec::new(),
        });
        for &child in fragment.children(source) {
            let copied = self.copy_detached(fragment, child, id);
            self.nodes[id.0].children.push(copied);
        }
        id
    }

    /// Serialize the tree with a standalone UTF-8 declaration.
    pub fn to_xml(&self) -> Result<String> {
        let root = self
            .root
            .ok_or_else(|| Error::XmlParse("document has no root element".to_string()))?;

        let mut writer = quick_xml::Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        self.write_node(&mut writer, root)?;

        String::from_utf8(writer.into_inner()).map_err(|e| Error::XmlParse(e.to_string()))
    }

    fn write_node(&self, writer: &mut quick_xml::Writer<Vec<u8>>, id: NodeId) -> Result<()> {
        let node = &self.nodes[id.0];
        match &node.data {
            NodeData::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            NodeData::Element { name, attributes } => {
                let mut start = BytesStart::new(name.as_str());
                for (key, value) in attributes {
                    start.push_attribute((key.as_str(), value.as_str()));
                }
                if node.children.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for &child in &node.children {
                        self.write_node(writer, child)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
                }
            }
        }
        Ok(())
    }
}

/// Iterator returned by [`XmlTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a XmlTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

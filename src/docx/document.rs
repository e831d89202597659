//! The main document part of a WordprocessingML package.

use super::constants::{
    CONTENT_TYPES_PART, DOCUMENT_PART, NS_W, NS_WP, RT_IMAGE, RT_OFFICE_DOCUMENT,
};
use super::inline_shape::{InlineShape, InlineShapes};
use super::picture::{picture_paragraph_xml, PictureMarkup, PictureOptions};
use super::template;
use crate::container::{rels_path_for, OoxmlContainer, Relationship, Relationships};
use crate::detect::{ensure_word_package, FormatType};
use crate::error::{Error, Result};
use crate::model::{sha1_hex, Image, ImagePart};
use crate::xml::{NodeId, XmlTree};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

/// An opened Word document.
///
/// Holds the parsed main document part and its relationships. Everything
/// else in the package is carried through to [`Document::to_bytes`]
/// untouched.
///
/// # Example
///
/// ```no_run
/// use docshapes::Document;
///
/// let doc = Document::open("report.docx")?;
/// for shape in doc.inline_shapes().iter() {
///     println!("{}", shape.shape_type());
/// }
/// # Ok::<(), docshapes::Error>(())
/// ```
pub struct Document {
    container: OoxmlContainer,
    format: FormatType,
    part_name: String,
    tree: XmlTree,
    relationships: Relationships,
    added_parts: BTreeMap<String, Vec<u8>>,
    content_type_defaults: BTreeMap<String, String>,
}

impl Document {
    /// Open a document from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Open a document asynchronously.
    #[cfg(feature = "async")]
    pub async fn open_async(path: impl AsRef<Path>) -> Result<Self> {
        let data = tokio::fs::read(path.as_ref()).await?;
        Self::from_bytes(data)
    }

    /// Open a document from the bytes of a package.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = ensure_word_package(&data)?;
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(container, format)
    }

    /// Open a document from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// An empty document with a single section.
    pub fn new() -> Result<Self> {
        Self::from_bytes(template::blank_package()?)
    }

    fn from_container(container: OoxmlContainer, format: FormatType) -> Result<Self> {
        let package_rels = container.read_package_relationships()?;
        let part_name = package_rels
            .get_by_type(RT_OFFICE_DOCUMENT)
            .first()
            .map(|rel| OoxmlContainer::resolve_path("", &rel.target))
            .unwrap_or_else(|| DOCUMENT_PART.to_string());

        let xml = container.read_xml(&part_name)?;
        let tree = XmlTree::parse(&xml)?;
        let relationships = container.read_relationships(&part_name)?;

        tracing::debug!(
            part = %part_name,
            format = %format,
            relationships = relationships.len(),
            "opened document"
        );

        Ok(Self {
            container,
            format,
            part_name,
            tree,
            relationships,
            added_parts: BTreeMap::new(),
            content_type_defaults: BTreeMap::new(),
        })
    }

    /// Package flavour the document was loaded from.
    pub fn format(&self) -> FormatType {
        self.format
    }

    /// Package path of the main document part.
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    /// Parsed main document part.
    pub fn tree(&self) -> &XmlTree {
        &self.tree
    }

    /// The `w:body` element.
    pub fn body(&self) -> Option<NodeId> {
        self.tree
            .root()
            .and_then(|root| self.tree.child_ns(root, NS_W, "body"))
    }

    /// Relationships of the main document part.
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// The inline shapes of the body, in document order.
    pub fn inline_shapes(&self) -> InlineShapes<'_> {
        InlineShapes::new(self)
    }

    /// The package part a relationship of the main part points at.
    pub fn related_part(&self, r_id: &str) -> Result<ImagePart> {
        let rel = self
            .relationships
            .get(r_id)
            .ok_or_else(|| Error::RelationshipNotFound(r_id.to_string()))?;
        if rel.external {
            return Err(Error::ExternalRelationship(rel.target.clone()));
        }

        let partname = OoxmlContainer::resolve_path(&self.part_name, &rel.target);
        let data = match self.added_parts.get(&partname) {
            Some(data) => data.clone(),
            None => self.container.read_binary(&partname)?,
        };
        Ok(ImagePart::new(partname, data))
    }

    /// Append a paragraph holding an inline picture made from `data`.
    pub fn add_inline_picture(&mut self, data: Vec<u8>) -> Result<InlineShape<'_>> {
        self.add_inline_picture_with(data, &PictureOptions::default())
    }

    /// Append an inline picture read from `reader`.
    pub fn add_inline_picture_reader<R: Read>(&mut self, mut reader: R) -> Result<InlineShape<'_>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.add_inline_picture(data)
    }

    /// Append an inline picture loaded from a file.
    ///
    /// The file name becomes the picture's alt text.
    pub fn add_inline_picture_file(&mut self, path: impl AsRef<Path>) -> Result<InlineShape<'_>> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut options = PictureOptions::default();
        if let Some(name) = path.file_name() {
            options = options.with_description(name.to_string_lossy());
        }
        self.add_inline_picture_with(data, &options)
    }

    /// Append an inline picture with explicit size and naming.
    ///
    /// The paragraph goes at the end of the body, ahead of the body-level
    /// `w:sectPr`. Returns the new shape.
    pub fn add_inline_picture_with(
        &mut self,
        data: Vec<u8>,
        options: &PictureOptions,
    ) -> Result<InlineShape<'_>> {
        let body = self
            .body()
            .ok_or_else(|| Error::MissingComponent(format!("{}: w:body", self.part_name)))?;
        let image = Image::from_bytes(data)?;
        let (cx, cy) = options.extent_for(&image);
        let (r_id, partname) = self.image_relationship(image);

        let shape_id = self.next_shape_id();
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| format!("Picture {}", shape_id));
        let filename = partname.rsplit('/').next().unwrap_or(&partname);
        let xml = picture_paragraph_xml(&PictureMarkup {
            shape_id,
            name: &name,
            description: options.description.as_deref().unwrap_or(""),
            filename,
            r_id: &r_id,
            cx,
            cy,
        });
        let fragment = XmlTree::parse(&xml)?;

        let position = self.insertion_point(body);
        let paragraph = self.tree.graft(body, position, &fragment)?;

        let inline = self
            .tree
            .find_ns_path(paragraph, NS_W, &["r", "drawing"])
            .and_then(|drawing| self.tree.child_ns(drawing, NS_WP, "inline"))
            .ok_or_else(|| Error::InvalidData("picture paragraph has no inline anchor".into()))?;

        tracing::debug!(r_id = %r_id, part = %partname, shape_id, cx, cy, "added inline picture");
        Ok(InlineShape::from_node(self, inline))
    }

    /// Write the package, including every change made through this value.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut overrides = BTreeMap::new();
        overrides.insert(self.part_name.clone(), self.tree.to_xml()?.into_bytes());
        overrides.insert(
            rels_path_for(&self.part_name),
            self.relationships.to_xml().into_bytes(),
        );
        for (name, data) in &self.added_parts {
            overrides.insert(name.clone(), data.clone());
        }
        if !self.content_type_defaults.is_empty() {
            overrides.insert(
                CONTENT_TYPES_PART.to_string(),
                self.content_types_xml()?.into_bytes(),
            );
        }
        self.container.to_bytes_with(&overrides)
    }

    /// Write the package to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;
        tracing::debug!(path = %path.as_ref().display(), bytes = bytes.len(), "saved document");
        Ok(())
    }

    /// Relationship id and part name for `image`, reusing an identical part.
    fn image_relationship(&mut self, image: Image) -> (String, String) {
        let digest = image.sha1();
        for rel in self.relationships.get_by_type(RT_IMAGE) {
            if rel.external {
                continue;
            }
            let partname = OoxmlContainer::resolve_path(&self.part_name, &rel.target);
            let existing = match self.added_parts.get(&partname) {
                Some(data) => sha1_hex(data),
                None => match self.container.read_binary(&partname) {
                    Ok(data) => sha1_hex(&data),
                    Err(_) => continue,
                },
            };
            if existing == digest {
                tracing::debug!(r_id = %rel.id, part = %partname, "reusing image part");
                return (rel.id.clone(), partname);
            }
        }

        let extension = image.extension();
        let partname = self.next_media_partname(extension);
        let r_id = self.relationships.next_id();
        self.relationships.add(Relationship {
            id: r_id.clone(),
            rel_type: RT_IMAGE.to_string(),
            target: self.relative_target(&partname),
            external: false,
        });
        self.content_type_defaults
            .entry(extension.to_string())
            .or_insert_with(|| image.content_type().to_string());
        self.added_parts.insert(partname.clone(), image.into_data());
        (r_id, partname)
    }

    /// `<dir>/media/imageN.<ext>` with the lowest N not used by any extension.
    ///
    /// Relationship targets count as used even when the part is missing, so
    /// a dangling reference never picks up a new image.
    fn next_media_partname(&self, extension: &str) -> String {
        let prefix = format!("{}media/image", self.part_dir());
        let targets: Vec<String> = self
            .relationships
            .iter()
            .filter(|rel| !rel.external)
            .map(|rel| OoxmlContainer::resolve_path(&self.part_name, &rel.target))
            .collect();
        let taken: BTreeSet<u32> = self
            .container
            .list_files_with_prefix(&prefix)
            .iter()
            .chain(self.added_parts.keys())
            .chain(&targets)
            .filter_map(|name| name.strip_prefix(&prefix))
            .filter_map(|rest| rest.split('.').next())
            .filter_map(|n| n.parse().ok())
            .collect();
        let n = (1..).find(|n| !taken.contains(n)).unwrap_or(1);
        format!("{}{}.{}", prefix, n, extension)
    }

    fn part_dir(&self) -> &str {
        match self.part_name.rfind('/') {
            Some(i) => &self.part_name[..=i],
            None => "",
        }
    }

    fn relative_target(&self, partname: &str) -> String {
        match partname.strip_prefix(self.part_dir()) {
            Some(rest) if !self.part_dir().is_empty() => rest.to_string(),
            _ => format!("/{}", partname),
        }
    }

    /// One past the highest `wp:docPr/@id` in the part.
    fn next_shape_id(&self) -> u32 {
        let Some(root) = self.tree.root() else {
            return 1;
        };
        self.tree
            .descendants(root)
            .filter(|&id| self.tree.is_ns(id, NS_WP, "docPr"))
            .filter_map(|id| self.tree.attr(id, "id"))
            .filter_map(|v| v.parse::<u32>().ok())
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Child position ahead of a trailing body-level `w:sectPr`.
    fn insertion_point(&self, body: NodeId) -> usize {
        let children = self.tree.children(body);
        let last_element = children
            .iter()
            .rposition(|&c| self.tree.name(c).is_some());
        match last_element {
            Some(i) if self.tree.is_ns(children[i], NS_W, "sectPr") => i,
            _ => children.len(),
        }
    }

    /// `[Content_Types].xml` with defaults for every newly used extension.
    fn content_types_xml(&self) -> Result<String> {
        let mut types = XmlTree::parse(&self.container.read_xml(CONTENT_TYPES_PART)?)?;
        let root = types
            .root()
            .ok_or_else(|| Error::MissingComponent(CONTENT_TYPES_PART.to_string()))?;

        let known: BTreeSet<String> = types
            .children(root)
            .iter()
            .filter(|&&c| types.is(c, "Default"))
            .filter_map(|&c| types.attr(c, "Extension"))
            .map(str::to_lowercase)
            .collect();

        for (extension, content_type) in &self.content_type_defaults {
            if !known.contains(&extension.to_lowercase()) {
                types.append_element(
                    root,
                    "Default",
                    &[
                        ("Extension", extension.as_str()),
                        ("ContentType", content_type.as_str()),
                    ],
                );
            }
        }
        types.to_xml()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("format", &self.format)
            .field("part_name", &self.part_name)
            .field("nodes", &self.tree.node_count())
            .field("relationships", &self.relationships.len())
            .field("added_parts", &self.added_parts.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::InlineShapeType;
    use std::io::Cursor;

    fn png(width: u32, height: u32, shade: u8) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image::RgbImage::from_pixel(width, height, image::Rgb([shade, shade, shade]))
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_blank_document_has_no_shapes() {
        let doc = Document::new().unwrap();
        assert_eq!(doc.format(), FormatType::Docx);
        assert_eq!(doc.part_name(), "word/document.xml");
        assert!(doc.body().is_some());
        assert!(doc.inline_shapes().is_empty());
    }

    #[test]
    fn test_add_picture_lands_before_sect_pr() {
        let mut doc = Document::new().unwrap();
        let shape = doc.add_inline_picture(png(10, 20, 0)).unwrap();
        assert_eq!(shape.shape_type(), InlineShapeType::Picture);
        assert_eq!(shape.embed_rid(), Some("rId1"));
        assert_eq!(shape.id(), Some(1));
        assert_eq!(shape.name(), Some("Picture 1"));

        let body = doc.body().unwrap();
        let names: Vec<_> = doc
            .tree()
            .children(body)
            .iter()
            .filter_map(|&c| doc.tree().name(c))
            .collect();
        assert_eq!(names, vec!["w:p", "w:sectPr"]);
    }

    #[test]
    fn test_added_part_is_reachable() {
        let mut doc = Document::new().unwrap();
        let data = png(4, 4, 7);
        doc.add_inline_picture(data.clone()).unwrap();

        let part = doc.related_part("rId1").unwrap();
        assert_eq!(part.partname, "word/media/image1.png");
        assert_eq!(part.sha1(), sha1_hex(&data));
        assert_eq!(
            doc.relationships().get("rId1").unwrap().target,
            "media/image1.png"
        );
    }

    #[test]
    fn test_identical_images_share_a_part() {
        let mut doc = Document::new().unwrap();
        let data = png(4, 4, 1);
        doc.add_inline_picture(data.clone()).unwrap();
        doc.add_inline_picture(data).unwrap();
        doc.add_inline_picture(png(4, 4, 200)).unwrap();

        let shapes = doc.inline_shapes();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].embed_rid(), shapes[1].embed_rid());
        assert_eq!(shapes[2].embed_rid(), Some("rId2"));
        assert_eq!(shapes[2].id(), Some(3));
        assert_eq!(
            doc.related_part("rId2").unwrap().partname,
            "word/media/image2.png"
        );
    }

    #[test]
    fn test_related_part_errors() {
        let doc = Document::new().unwrap();
        assert!(matches!(
            doc.related_part("rId42"),
            Err(Error::RelationshipNotFound(id)) if id == "rId42"
        ));
    }

    #[test]
    fn test_rejects_garbage_picture() {
        let mut doc = Document::new().unwrap();
        let result = doc.add_inline_picture(b"not a picture".to_vec());
        assert!(matches!(result, Err(Error::UnrecognizedImage(_))));
        assert!(doc.inline_shapes().is_empty());
        assert!(doc.relationships().is_empty());
    }

    #[test]
    fn test_saved_package_declares_png() {
        let mut doc = Document::new().unwrap();
        doc.add_inline_picture(png(2, 2, 0)).unwrap();
        let bytes = doc.to_bytes().unwrap();

        let container = OoxmlContainer::from_bytes(bytes).unwrap();
        let types = container.read_xml(CONTENT_TYPES_PART).unwrap();
        assert!(types.contains(r#"Extension="png""#));
        assert!(types.contains("image/png"));
        assert!(container.exists("word/media/image1.png"));
    }
}

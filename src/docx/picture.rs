//! Inline picture construction.

use super::constants::{NS_R, NS_W, NS_WP};
use crate::model::{Image, DEFAULT_DPI};
use crate::xml::escape_xml;

/// Options for pictures added with [`Document::add_inline_picture_with`].
///
/// Sizes are in EMUs. Giving only one of width or height scales the other
/// to keep the image's aspect ratio.
///
/// [`Document::add_inline_picture_with`]: super::Document::add_inline_picture_with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureOptions {
    /// Requested width in EMUs
    pub width: Option<i64>,

    /// Requested height in EMUs
    pub height: Option<i64>,

    /// Resolution used to derive the native size from pixels
    pub dpi: u32,

    /// Shape name (`wp:docPr/@name`); defaults to "Picture N"
    pub name: Option<String>,

    /// Alt text (`wp:docPr/@descr`)
    pub description: Option<String>,
}

impl Default for PictureOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            dpi: DEFAULT_DPI,
            name: None,
            description: None,
        }
    }
}

impl PictureOptions {
    /// Create new picture options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width in EMUs.
    pub fn with_width(mut self, emu: i64) -> Self {
        self.width = Some(emu);
        self
    }

    /// Set the height in EMUs.
    pub fn with_height(mut self, emu: i64) -> Self {
        self.height = Some(emu);
        self
    }

    /// Set the resolution used for the native size.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    /// Set the shape name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the alt text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Final `(cx, cy)` for `image`.
    ///
    /// A derived side that does not fit in an `i64` saturates.
    pub fn extent_for(&self, image: &Image) -> (i64, i64) {
        let (native_cx, native_cy) = image.native_size_emu(self.dpi);
        match (self.width, self.height) {
            (Some(cx), Some(cy)) => (cx, cy),
            (Some(cx), None) if native_cx > 0 => (cx, scale(native_cy, cx, native_cx)),
            (None, Some(cy)) if native_cy > 0 => (scale(native_cx, cy, native_cy), cy),
            (Some(cx), None) => (cx, native_cy),
            (None, Some(cy)) => (native_cx, cy),
            (None, None) => (native_cx, native_cy),
        }
    }
}

/// `value * numerator / denominator`, saturating at the `i64` bounds.
fn scale(value: i64, numerator: i64, denominator: i64) -> i64 {
    let scaled = i128::from(value) * i128::from(numerator) / i128::from(denominator);
    i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX })
}

/// Everything the picture markup needs.
pub(crate) struct PictureMarkup<'a> {
    pub shape_id: u32,
    pub name: &'a str,
    pub description: &'a str,
    pub filename: &'a str,
    pub r_id: &'a str,
    pub cx: i64,
    pub cy: i64,
}

/// A `w:p` holding one run with one inline picture.
///
/// The paragraph declares every prefix it uses, so it keeps its meaning
/// wherever it is grafted, whatever prefixes the host part binds.
pub(crate) fn picture_paragraph_xml(markup: &PictureMarkup<'_>) -> String {
    format!(
        concat!(
            r#"<w:p xmlns:w="{ns_w}" xmlns:wp="{ns_wp}" xmlns:r="{ns_r}"><w:r><w:drawing>"#,
            r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:docPr id="{id}" name="{name}" descr="{descr}"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#,
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:nvPicPr><pic:cNvPr id="0" name="{filename}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rid}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline>"#,
            r#"</w:drawing></w:r></w:p>"#,
        ),
        ns_w = NS_W,
        ns_wp = NS_WP,
        ns_r = NS_R,
        cx = markup.cx,
        cy = markup.cy,
        id = markup.shape_id,
        name = escape_xml(markup.name),
        descr = escape_xml(markup.description),
        filename = escape_xml(markup.filename),
        rid = escape_xml(markup.r_id),
    )
}

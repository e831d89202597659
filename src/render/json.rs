//! JSON renderer implementation.

use crate::docx::InlineShapes;
use crate::error::Result;

use super::report::shape_report;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert a shape collection to a JSON array of summaries.
pub fn to_json(shapes: &InlineShapes<'_>, format: JsonFormat) -> Result<String> {
    let report = shape_report(shapes);
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(&report)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(&report)?,
    };
    Ok(json)
}

/// Convert a shape collection to pretty-printed JSON.
pub fn to_json_default(shapes: &InlineShapes<'_>) -> Result<String> {
    to_json(shapes, JsonFormat::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::Document;
    use crate::render::ShapeSummary;
    use std::io::Cursor;

    fn document_with_picture() -> Document {
        let mut png = Cursor::new(Vec::new());
        image::RgbImage::new(8, 8)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();
        let mut doc = Document::new().unwrap();
        doc.add_inline_picture(png.into_inner()).unwrap();
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let doc = document_with_picture();
        let json = to_json(&doc.inline_shapes(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"shape_type\": \"PICTURE\""));
        assert!(json.contains("\"partname\": \"word/media/image1.png\""));
    }

    #[test]
    fn test_to_json_compact() {
        let doc = document_with_picture();
        let json = to_json(&doc.inline_shapes(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"value\":3"));
    }

    #[test]
    fn test_report_roundtrip() {
        let doc = document_with_picture();
        let json = to_json_default(&doc.inline_shapes()).unwrap();
        let parsed: Vec<ShapeSummary> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name.as_deref(), Some("Picture 1"));
        assert!(parsed[0].image.as_ref().unwrap().size > 0);
        assert!(parsed[0].sha1.is_some());
    }

    #[test]
    fn test_empty_collection() {
        let doc = Document::new().unwrap();
        assert_eq!(to_json(&doc.inline_shapes(), JsonFormat::Compact).unwrap(), "[]");
    }
}

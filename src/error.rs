//! Error types for the docshapes library.

use std::io;
use thiserror::Error;

/// Result type alias for docshapes operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or editing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format could not be determined.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading or writing the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing or writing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the document.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// A relationship id has no entry in the part's relationships.
    #[error("Relationship not found: {0}")]
    RelationshipNotFound(String),

    /// The relationship points outside the package and has no local payload.
    #[error("Relationship target is external: {0}")]
    ExternalRelationship(String),

    /// Indexed access past either end of a shape collection.
    #[error("Inline shape index [{index}] out of range (collection has {len} shapes)")]
    IndexOutOfRange { index: isize, len: usize },

    /// The shape variant carries no payload of the requested kind.
    #[error("Shape has no {0} payload")]
    NoPayload(&'static str),

    /// Bytes supplied as a picture are not a recognised raster image.
    #[error("Unrecognized image: {0}")]
    UnrecognizedImage(String),

    /// Error while serializing a report.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::UnrecognizedImage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format");

        let err = Error::UnsupportedFormat("Excel Workbook".to_string());
        assert_eq!(err.to_string(), "Unsupported format: Excel Workbook");

        let err = Error::IndexOutOfRange { index: -1, len: 5 };
        assert_eq!(
            err.to_string(),
            "Inline shape index [-1] out of range (collection has 5 shapes)"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}

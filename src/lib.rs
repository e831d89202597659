//! # docshapes
//!
//! Inline shapes of Word (.docx) documents: list them, classify them, pull
//! out their images and add new pictures.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docshapes::{Document, InlineShapeType};
//!
//! let mut doc = Document::open("report.docx")?;
//!
//! for shape in doc.inline_shapes().iter() {
//!     if shape.shape_type() == InlineShapeType::Picture {
//!         let image = shape.image()?;
//!         println!("{} ({} bytes)", image.partname, image.size);
//!     }
//! }
//!
//! doc.add_inline_picture_file("logo.png")?;
//! doc.save("report-with-logo.docx")?;
//! # Ok::<(), docshapes::Error>(())
//! ```
//!
//! ## Indexed Access
//!
//! ```no_run
//! use docshapes::Document;
//!
//! let doc = Document::open("report.docx")?;
//! let shapes = doc.inline_shapes();
//!
//! let first = shapes.get(0)?;
//! println!("{} is {}", first.name().unwrap_or("?"), first.shape_type());
//!
//! // Negative indices do not count from the end
//! assert!(shapes.get_signed(-1).is_err());
//! # Ok::<(), docshapes::Error>(())
//! ```
//!
//! ## Features
//!
//! - `docx` (default): Word document support
//! - `async`: Async file loading with Tokio

pub mod container;
pub mod detect;
pub mod error;
pub mod model;
pub mod xml;

#[cfg(feature = "docx")]
pub mod docx;

#[cfg(feature = "docx")]
pub mod render;

// Re-exports
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, Result};
pub use model::{Image, ImagePart};

#[cfg(feature = "docx")]
pub use docx::{
    Document, InlineShape, InlineShapeKind, InlineShapeType, InlineShapes, PictureOptions,
};

#[cfg(feature = "docx")]
use std::path::Path;

/// Open a Word document.
///
/// # Example
///
/// ```no_run
/// let doc = docshapes::open("document.docx")?;
/// println!("Inline shapes: {}", doc.inline_shapes().len());
/// # Ok::<(), docshapes::Error>(())
/// ```
#[cfg(feature = "docx")]
pub fn open(path: impl AsRef<Path>) -> Result<Document> {
    Document::open(path)
}

/// Open a Word document held in memory.
#[cfg(feature = "docx")]
pub fn open_bytes(data: Vec<u8>) -> Result<Document> {
    Document::from_bytes(data)
}

/// Library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

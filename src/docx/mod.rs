//! WordprocessingML (.docx) documents and their inline shapes.
//!
//! [`Document`] owns the main document part; [`InlineShapes`] indexes the
//! graphical objects anchored inline in its body.

pub mod constants;
mod document;
mod inline_shape;
mod picture;
mod template;

pub use document::Document;
pub use inline_shape::{InlineShape, InlineShapeKind, InlineShapeType, InlineShapes};
pub use picture::PictureOptions;

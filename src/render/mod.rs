//! Output rendering for inline shape collections.
//!
//! # Example
//!
//! ```no_run
//! use docshapes::{render::*, Document};
//!
//! let doc = Document::open("document.docx")?;
//! let shapes = doc.inline_shapes();
//!
//! // Aligned listing, one shape per line
//! println!("{}", to_text(&shapes));
//!
//! // Render to JSON
//! let json = to_json(&shapes, JsonFormat::Pretty)?;
//! # Ok::<(), docshapes::Error>(())
//! ```

mod json;
mod report;
mod text;

pub use json::{to_json, to_json_default, JsonFormat};
pub use report::{shape_report, ShapeSummary};
pub use text::to_text;

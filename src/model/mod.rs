//! Data structures shared by the document and shape layers.
//!
//! Image payloads are modelled independently of where they live: an
//! [`Image`] is a picture the caller wants to insert, an [`ImagePart`] is a
//! blob already stored in the package.

mod media;

pub use media::*;

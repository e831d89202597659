//! Per-shape summaries shared by the renderers.

use crate::docx::{InlineShapeKind, InlineShapeType, InlineShapes};
use crate::error::Error;
use crate::model::ImagePart;
use serde::{Deserialize, Serialize};

/// Everything known about one inline shape, ready to print or serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSummary {
    /// Position in the collection
    pub index: usize,

    /// Closed classification
    pub shape_type: InlineShapeType,

    /// Word object-model value of `shape_type`
    pub value: i32,

    /// Classification with its relationship ids
    pub kind: InlineShapeKind,

    /// `wp:docPr/@id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    /// `wp:docPr/@name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Alt text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Width in EMUs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,

    /// Height in EMUs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,

    /// Embedded image part, for pictures stored in the package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePart>,

    /// Hex SHA-1 of the embedded image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,

    /// Target of an external picture link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,
}

/// Summarize every shape of a collection, in order.
///
/// Payload lookups that fail (dangling relationships, missing media) leave
/// the image fields empty instead of failing the whole report.
pub fn shape_report(shapes: &InlineShapes<'_>) -> Vec<ShapeSummary> {
    shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| {
            let image = match shape.embed_rid() {
                Some(_) => match shape.image() {
                    Ok(part) => Some(part),
                    Err(Error::ExternalRelationship(_)) => None,
                    Err(e) => {
                        tracing::warn!(index, error = %e, "could not load image part");
                        None
                    }
                },
                None => None,
            };

            ShapeSummary {
                index,
                shape_type: shape.shape_type(),
                value: shape.shape_type().value(),
                kind: shape.kind().clone(),
                id: shape.id(),
                name: shape.name().map(str::to_string),
                description: shape.description().map(str::to_string),
                width: shape.width(),
                height: shape.height(),
                sha1: image.as_ref().map(ImagePart::sha1),
                image,
                link_target: shape.link_target().map(str::to_string),
            }
        })
        .collect()
}

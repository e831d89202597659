//! Plain text renderer implementation.

use crate::docx::InlineShapes;

use super::report::{shape_report, ShapeSummary};

/// Render a shape collection as an aligned plain-text listing.
///
/// One line per shape: index, type, name, size in EMUs and the payload
/// (embedded part or link target).
pub fn to_text(shapes: &InlineShapes<'_>) -> String {
    let report = shape_report(shapes);
    if report.is_empty() {
        return "No inline shapes".to_string();
    }

    let mut output = String::new();
    for summary in &report {
        output.push_str(&render_line(summary));
        output.push('\n');
    }
    output.trim_end().to_string()
}

fn render_line(summary: &ShapeSummary) -> String {
    let size = match (summary.width, summary.height) {
        (Some(cx), Some(cy)) => format!("{}x{}", cx, cy),
        _ => "-".to_string(),
    };
    let payload = match (&summary.image, &summary.link_target) {
        (Some(image), _) => image.partname.clone(),
        (None, Some(target)) => target.clone(),
        (None, None) => summary
            .kind
            .relationship_id()
            .map(str::to_string)
            .unwrap_or_else(|| "-".to_string()),
    };

    format!(
        "{:>3}  {:<20} {:<24} {:<18} {}",
        summary.index,
        summary.shape_type.name(),
        summary.name.as_deref().unwrap_or("-"),
        size,
        payload
    )
}

//! Minimal XML object model used for editable package parts.

mod tree;

pub use tree::{Descendants, NodeId, XmlTree};

/// Local part of a qualified name (`wp:inline` becomes `inline`).
pub fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map(|(_, local)| local)
        .unwrap_or(qualified)
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

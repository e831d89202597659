//! Namespace URIs, relationship types and content types used by WordprocessingML.

/// Main WordprocessingML namespace (`w:`).
pub const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Word drawing namespace (`wp:`).
pub const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// Office document relationships namespace (`r:`).
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// DrawingML main namespace (`a:`).
pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// Markup compatibility namespace (`mc:`).
pub const NS_MC: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

/// `graphicData/@uri` of a picture.
pub const URI_PICTURE: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
/// `graphicData/@uri` of a chart.
pub const URI_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
/// `graphicData/@uri` of a SmartArt diagram.
pub const URI_DIAGRAM: &str = "http://schemas.openxmlformats.org/drawingml/2006/diagram";
/// `graphicData/@uri` of an embedded OLE object.
pub const URI_OLE: &str = "http://schemas.openxmlformats.org/presentationml/2006/ole";

/// Relationship type of the main document part.
pub const RT_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
/// Relationship type of an image part.
pub const RT_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Default location of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Package part listing content types.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

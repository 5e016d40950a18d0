//! XML namespaces used in WordprocessingML

/// WordprocessingML main namespace
pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Relationships namespace
pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Drawing namespace
pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// DrawingML main namespace
pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// Pictures namespace
pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// Standard namespace declarations for document.xml
pub fn document_namespaces() -> Vec<(&'static str, &'static str)> {
    vec![
        ("xmlns:w", W),
        ("xmlns:r", R),
        ("xmlns:wp", WP),
        ("xmlns:a", A),
        ("xmlns:pic", PIC),
    ]
}

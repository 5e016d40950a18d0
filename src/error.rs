//! Error types for docx-splice

use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML encoding error: {0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Run index {index} out of range (paragraph has {count} runs)")]
    RunIndexOutOfRange { index: usize, count: usize },

    #[error("Paragraph index {index} out of range (body has {count} paragraphs)")]
    ParagraphIndexOutOfRange { index: usize, count: usize },

    #[error("Cannot split run of length {len} at offset {offset}")]
    SplitOutOfRange { offset: usize, len: usize },

    #[error("Span {start}..{end} out of range for text of length {len}")]
    SpanOutOfRange { start: usize, end: usize, len: usize },

    #[error("Offset {0} is not a char boundary")]
    NotCharBoundary(usize),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

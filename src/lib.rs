//! # docx-splice
//!
//! Run-level editing operations for WordprocessingML paragraphs: regex
//! find/replace across run boundaries, script-aware font access, and run
//! splitting/splicing.
//!
//! ## Features
//!
//! - Regex find/replace over a paragraph's concatenated run text; matches
//!   may cross run boundaries and replacements keep the formatting of the
//!   runs they overwrite (capture-group references keep the group's own
//!   formatting)
//! - Script-aware font names: read and write the w:ascii, w:hAnsi,
//!   w:eastAsia, and w:cs slots of w:rFonts independently
//! - Run surgery: set text, split at an offset, insert after, remove,
//!   isolate a text span at run boundaries
//! - Round-trip preservation (unknown elements are kept intact)
//!
//! The crate parses and serializes `document.xml` content; opening and
//! saving the `.docx` container is the caller's responsibility.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_splice::{find_and_replace_all, Document};
//! use regex::Regex;
//!
//! let mut doc = Document::from_xml(&document_xml)?;
//! let pattern = Regex::new("cat")?;
//! find_and_replace_all(&mut doc, &pattern, "dog")?;
//! let out = doc.to_xml()?;
//! ```

pub mod document;
pub mod edit;
pub mod error;
pub mod xml;

pub use document::{
    BlockContent, Body, BreakType, Document, FontScript, Paragraph, ParagraphContent,
    ParagraphProperties, Run, RunContent, RunProperties,
};
pub use edit::{find, find_and_replace, find_and_replace_all, Match};
pub use error::{Error, Result};

//! Document model - the element tree the editing operations mutate

mod body;
mod paragraph;
mod run;

pub use body::{BlockContent, Body};
pub use paragraph::{Paragraph, ParagraphContent, ParagraphProperties};
pub use run::{BreakType, FontScript, Run, RunContent, RunProperties};

use crate::error::{Error, Result};
use crate::xml;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

/// An in-memory WordprocessingML document body.
///
/// Constructed from `document.xml` content and serialized back to it; the
/// surrounding OPC package (the `.docx` ZIP container) is the caller's
/// responsibility.
#[derive(Clone, Debug, Default)]
pub struct Document {
    /// Parsed document body
    body: Body,
    /// Attributes of the w:document root (namespace declarations,
    /// mc:Ignorable, ...), preserved for round-trip
    root_attrs: Vec<(String, String)>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from document.xml content
    pub fn from_xml(xml: &str) -> Result<Self> {
        let (body, root_attrs) = parse_document_xml(xml)?;
        Ok(Self { body, root_attrs })
    }

    /// Parse from document.xml bytes
    pub fn from_xml_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_xml(std::str::from_utf8(bytes)?)
    }

    /// Serialize back to document.xml content
    pub fn to_xml(&self) -> Result<String> {
        serialize_document_xml(&self.body, &self.root_attrs)
    }

    /// Get all paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.paragraphs()
    }

    /// Get all paragraphs mutably
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.body.paragraphs_mut()
    }

    /// Get paragraph count
    pub fn paragraph_count(&self) -> usize {
        self.body.paragraph_count()
    }

    /// Get paragraph by index
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.body.paragraphs().nth(index)
    }

    /// Get paragraph by index, mutably
    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.body.paragraphs_mut().nth(index)
    }

    /// Delete the paragraph at `index` from the body
    pub fn remove_paragraph(&mut self, index: usize) -> Result<Paragraph> {
        self.body.remove_paragraph(index)
    }

    /// Get all text in the document
    pub fn text(&self) -> String {
        self.body
            .paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get the body
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Get mutable body
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Add a paragraph with text
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Paragraph {
        self.body.add_paragraph(Paragraph::new(text));
        self.body
            .paragraphs_mut()
            .last()
            .expect("Just added paragraph")
    }
}

/// Parse document.xml content, returning the body and the root element's
/// attributes
fn parse_document_xml(xml: &str) -> Result<(Body, Vec<(String, String)>)> {
    // No text trimming: run text whitespace is significant and is exactly
    // what the editing invariant protects.
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut body = None;
    let mut root_attrs = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.name();
                let local = name.local_name();

                match local.as_ref() {
                    b"body" => {
                        body = Some(Body::from_reader(&mut reader)?);
                    }
                    b"document" => {
                        // Preserved content may use prefixes only the root
                        // declares, so the declarations must ride along.
                        root_attrs = xml::attrs(&e);
                    }
                    _ => {
                        xml::skip_element(&mut reader, &e)?;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let body = body.ok_or_else(|| Error::InvalidDocument("Missing w:body element".into()))?;
    Ok((body, root_attrs))
}

/// Serialize body to document.xml content
fn serialize_document_xml(body: &Body, root_attrs: &[(String, String)]) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new(&mut buffer);

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        Some("yes"),
    )))?;

    let mut doc_start = BytesStart::new("w:document");
    if root_attrs.is_empty() {
        // document built from scratch: declare the standard namespaces
        for (attr, value) in xml::document_namespaces() {
            doc_start.push_attribute((attr, value));
        }
    } else {
        for (key, value) in root_attrs {
            doc_start.push_attribute((key.as_str(), value.as_str()));
        }
    }
    writer.write_event(Event::Start(doc_start))?;

    body.write_to(&mut writer)?;

    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    let xml_bytes = buffer.into_inner();
    String::from_utf8(xml_bytes).map_err(|e| Error::InvalidDocument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIMPLE_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hello, World!</w:t></w:r></w:p><w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>This is a heading</w:t></w:r></w:p></w:body></w:document>"#;

    #[test]
    fn test_parse_simple_document() {
        let doc = Document::from_xml(SIMPLE_DOC).unwrap();

        let paras: Vec<_> = doc.paragraphs().collect();
        assert_eq!(paras.len(), 2);

        assert_eq!(paras[0].text(), "Hello, World!");

        assert_eq!(paras[1].text(), "This is a heading");
        assert_eq!(paras[1].style(), Some("Heading1"));

        let runs: Vec<_> = paras[1].runs().collect();
        assert_eq!(runs.len(), 1);
        assert!(runs[0].bold());
    }

    #[test]
    fn test_parse_script_fonts() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Calibri" w:eastAsia="SimSun" w:cs="Arial"/></w:rPr><w:t>text</w:t></w:r></w:p></w:body></w:document>"#;

        let doc = Document::from_xml(xml).unwrap();
        let run = doc.paragraph(0).unwrap().run(0).unwrap();

        assert_eq!(run.font_name(FontScript::Latin), Some("Times New Roman"));
        assert_eq!(run.font_name(FontScript::HighAnsi), Some("Calibri"));
        assert_eq!(run.font_name(FontScript::EastAsia), Some("SimSun"));
        assert_eq!(run.font_name(FontScript::ComplexScript), Some("Arial"));
    }

    #[test]
    fn test_roundtrip_preserves_unknown_elements() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>before</w:t></w:r><w:customTag w:attr="x"><w:nested/></w:customTag></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:body></w:document>"#;

        let doc = Document::from_xml(xml).unwrap();
        let out = doc.to_xml().unwrap();

        assert!(out.contains("w:customTag"));
        assert!(out.contains("w:nested"));
        assert!(out.contains("w:tbl"));

        // reparse: editable content intact
        let doc2 = Document::from_xml(&out).unwrap();
        assert_eq!(doc2.paragraph(0).unwrap().text(), "before");
    }

    #[test]
    fn test_roundtrip_keeps_root_namespace_declarations() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" mc:Ignorable="w14"><w:body><w:p><w:r><w:rPr><w14:glow w14:rad="101600"/></w:rPr><w:t>glowing</w:t></w:r></w:p></w:body></w:document>"#;

        let doc = Document::from_xml(xml).unwrap();
        let out = doc.to_xml().unwrap();

        // preserved content uses the w14 prefix, so its declaration must
        // survive on the root
        assert!(out.contains(r#"xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml""#));
        assert!(out.contains(r#"mc:Ignorable="w14""#));
        assert!(out.contains("w14:glow"));

        let doc2 = Document::from_xml(&out).unwrap();
        assert_eq!(doc2.paragraph(0).unwrap().text(), "glowing");
    }

    #[test]
    fn test_new_document_declares_default_namespaces() {
        let mut doc = Document::new();
        doc.add_paragraph("fresh");

        let out = doc.to_xml().unwrap();
        assert!(out.contains(r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#));
    }

    #[test]
    fn test_roundtrip_whitespace_exact() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t xml:space="preserve">The </w:t></w:r><w:r><w:t>cat</w:t></w:r><w:r><w:t xml:space="preserve"> sat</w:t></w:r></w:p></w:body></w:document>"#;

        let doc = Document::from_xml(xml).unwrap();
        assert_eq!(doc.paragraph(0).unwrap().text(), "The cat sat");

        let doc2 = Document::from_xml(&doc.to_xml().unwrap()).unwrap();
        assert_eq!(doc2.paragraph(0).unwrap().text(), "The cat sat");
    }

    #[test]
    fn test_remove_paragraph() {
        let mut doc = Document::new();
        doc.add_paragraph("one");
        doc.add_paragraph("two");
        doc.add_paragraph("three");

        let removed = doc.remove_paragraph(1).unwrap();
        assert_eq!(removed.text(), "two");
        assert_eq!(doc.text(), "one\nthree");
    }
}

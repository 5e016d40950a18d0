//! Run element (w:r) - a contiguous run of text with uniform formatting

use crate::error::{Error, Result};
use crate::xml::{attrs, get_attr, get_w_val, parse_bool, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;
use std::io::BufRead;

/// Script category a font name is bound to within w:rFonts.
///
/// WordprocessingML carries up to four independent font names per run,
/// one per script category, so reads and writes must name the category
/// instead of assuming a single scalar font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontScript {
    /// ASCII range (w:ascii)
    Latin,
    /// High ANSI range (w:hAnsi)
    HighAnsi,
    /// East Asian text (w:eastAsia)
    EastAsia,
    /// Complex scripts such as Arabic (w:cs)
    ComplexScript,
}

impl FontScript {
    /// The w:rFonts attribute carrying this script's font name
    pub fn attr_name(self) -> &'static str {
        match self {
            FontScript::Latin => "w:ascii",
            FontScript::HighAnsi => "w:hAnsi",
            FontScript::EastAsia => "w:eastAsia",
            FontScript::ComplexScript => "w:cs",
        }
    }

    fn local_name(self) -> &'static str {
        match self {
            FontScript::Latin => "ascii",
            FontScript::HighAnsi => "hAnsi",
            FontScript::EastAsia => "eastAsia",
            FontScript::ComplexScript => "cs",
        }
    }
}

/// Run element (w:r)
#[derive(Clone, Debug, Default)]
pub struct Run {
    /// Run properties
    pub properties: Option<RunProperties>,
    /// Run content
    pub content: Vec<RunContent>,
    /// Unknown attributes (preserved)
    pub unknown_attrs: Vec<(String, String)>,
    /// Unknown children (preserved)
    pub unknown_children: Vec<RawXmlNode>,
}

/// Content within a run
#[derive(Clone, Debug)]
pub enum RunContent {
    /// Text (w:t)
    Text(String),
    /// Tab (w:tab)
    Tab,
    /// Break (w:br)
    Break(BreakType),
    /// Carriage return (w:cr)
    CarriageReturn,
    /// Soft hyphen
    SoftHyphen,
    /// Non-breaking hyphen
    NoBreakHyphen,
    /// Unknown (preserved)
    Unknown(RawXmlNode),
}

impl RunContent {
    /// Byte width of this piece in the run's visible text
    fn width(&self) -> usize {
        match self {
            RunContent::Text(t) => t.len(),
            RunContent::Tab => 1,
            RunContent::Break(BreakType::TextWrapping) | RunContent::CarriageReturn => 1,
            _ => 0,
        }
    }
}

/// Break type
#[derive(Clone, Debug, Default)]
pub enum BreakType {
    #[default]
    TextWrapping,
    Page,
    Column,
}

/// Run properties (w:rPr)
#[derive(Clone, Debug, Default)]
pub struct RunProperties {
    /// Style ID
    pub style: Option<String>,
    /// Bold
    pub bold: Option<bool>,
    /// Italic
    pub italic: Option<bool>,
    /// Underline type
    pub underline: Option<String>,
    /// Strike-through
    pub strike: Option<bool>,
    /// Double strike-through
    pub double_strike: Option<bool>,
    /// Font size (in half-points, e.g., 24 = 12pt)
    pub size: Option<u32>,
    /// Color (RGB hex)
    pub color: Option<String>,
    /// Highlight color
    pub highlight: Option<String>,
    /// Font (ASCII range)
    pub font_latin: Option<String>,
    /// Font (high ANSI range)
    pub font_high_ansi: Option<String>,
    /// Font (East Asian)
    pub font_east_asia: Option<String>,
    /// Font (complex scripts)
    pub font_complex: Option<String>,
    /// Vertical alignment (superscript/subscript)
    pub vertical_align: Option<String>,
    /// Unknown children (preserved)
    pub unknown_children: Vec<RawXmlNode>,
}

impl RunProperties {
    /// Get the font name bound to a script category
    pub fn font(&self, script: FontScript) -> Option<&str> {
        self.font_slot(script).as_deref()
    }

    /// Set the font name for a script category
    pub fn set_font(&mut self, script: FontScript, name: impl Into<String>) {
        *self.font_slot_mut(script) = Some(name.into());
    }

    fn font_slot(&self, script: FontScript) -> &Option<String> {
        match script {
            FontScript::Latin => &self.font_latin,
            FontScript::HighAnsi => &self.font_high_ansi,
            FontScript::EastAsia => &self.font_east_asia,
            FontScript::ComplexScript => &self.font_complex,
        }
    }

    fn font_slot_mut(&mut self, script: FontScript) -> &mut Option<String> {
        match script {
            FontScript::Latin => &mut self.font_latin,
            FontScript::HighAnsi => &mut self.font_high_ansi,
            FontScript::EastAsia => &mut self.font_east_asia,
            FontScript::ComplexScript => &mut self.font_complex,
        }
    }

    fn read_fonts(&mut self, e: &BytesStart) {
        for script in [
            FontScript::Latin,
            FontScript::HighAnsi,
            FontScript::EastAsia,
            FontScript::ComplexScript,
        ] {
            let value = get_attr(e, script.attr_name())
                .or_else(|| get_attr(e, script.local_name()));
            if value.is_some() {
                *self.font_slot_mut(script) = value;
            }
        }
    }

    fn has_fonts(&self) -> bool {
        self.font_latin.is_some()
            || self.font_high_ansi.is_some()
            || self.font_east_asia.is_some()
            || self.font_complex.is_some()
    }
}

impl Run {
    /// Create a new run with text
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            content: vec![RunContent::Text(text.into())],
            ..Default::default()
        }
    }

    /// Create a new run with text and the given properties
    pub fn with_properties(text: impl Into<String>, properties: Option<RunProperties>) -> Self {
        Run {
            properties,
            content: vec![RunContent::Text(text.into())],
            ..Default::default()
        }
    }

    /// Parse from reader (after w:r start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut run = Run {
            unknown_attrs: attrs(start),
            ..Default::default()
        };

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"rPr" => {
                        run.properties = Some(RunProperties::from_reader(reader)?);
                    }
                    b"t" => {
                        let text = read_text_content(reader)?;
                        run.content.push(RunContent::Text(text));
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        run.content.push(RunContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"t" => {
                        run.content.push(RunContent::Text(String::new()));
                    }
                    b"tab" => {
                        run.content.push(RunContent::Tab);
                    }
                    b"br" => {
                        let break_type = match get_attr(&e, "w:type")
                            .or_else(|| get_attr(&e, "type"))
                            .as_deref()
                        {
                            Some("page") => BreakType::Page,
                            Some("column") => BreakType::Column,
                            _ => BreakType::TextWrapping,
                        };
                        run.content.push(RunContent::Break(break_type));
                    }
                    b"cr" => {
                        run.content.push(RunContent::CarriageReturn);
                    }
                    b"softHyphen" => {
                        run.content.push(RunContent::SoftHyphen);
                    }
                    b"noBreakHyphen" => {
                        run.content.push(RunContent::NoBreakHyphen);
                    }
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        run.content.push(RunContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"r" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(run)
    }

    /// Create from empty element
    pub fn from_empty(start: &BytesStart) -> Self {
        Run {
            unknown_attrs: attrs(start),
            ..Default::default()
        }
    }

    /// Get all text in this run
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.content {
            match content {
                RunContent::Text(t) => result.push_str(t),
                RunContent::Tab => result.push('\t'),
                RunContent::Break(BreakType::TextWrapping) => result.push('\n'),
                RunContent::CarriageReturn => result.push('\n'),
                _ => {}
            }
        }
        result
    }

    /// Byte length of this run's visible text
    pub fn text_len(&self) -> usize {
        self.content.iter().map(RunContent::width).sum()
    }

    /// Replace the run's textual content with a single text piece.
    ///
    /// Properties and preserved unknown children are untouched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = vec![RunContent::Text(text.into())];
    }

    /// Get the font name bound to a script category, if set on this run
    pub fn font_name(&self, script: FontScript) -> Option<&str> {
        self.properties.as_ref()?.font(script)
    }

    /// Set the font name for a script category, creating rFonts as needed
    pub fn set_font_name(&mut self, script: FontScript, name: impl Into<String>) {
        self.properties
            .get_or_insert_with(Default::default)
            .set_font(script, name);
    }

    /// Rename the font for a script category through a lookup table.
    ///
    /// If the current name is a key in `renames`, it is replaced by the
    /// mapped value, which is returned. Runs whose current name is not in
    /// the table (or which carry no name for the script) are untouched.
    pub fn rename_font(
        &mut self,
        script: FontScript,
        renames: &HashMap<String, String>,
    ) -> Option<String> {
        let new_name = renames.get(self.font_name(script)?)?.clone();
        self.set_font_name(script, new_name.clone());
        Some(new_name)
    }

    /// Split this run at a byte offset of its visible text.
    ///
    /// The run keeps `text[..offset]`; the returned run carries
    /// `text[offset..]` with cloned properties. The offset must be strictly
    /// inside the text and on a char boundary.
    pub fn split_off(&mut self, offset: usize) -> Result<Run> {
        let len = self.text_len();
        if offset == 0 || offset >= len {
            return Err(Error::SplitOutOfRange { offset, len });
        }
        self.check_boundary(offset)?;

        let mut head = Vec::with_capacity(self.content.len());
        let mut tail = Vec::new();
        let mut pos = 0usize;
        let mut in_tail = false;

        for piece in self.content.drain(..) {
            if in_tail {
                tail.push(piece);
                continue;
            }
            let width = piece.width();
            if pos + width <= offset {
                pos += width;
                head.push(piece);
                // zero-width pieces sitting exactly on the cut stay in the head
                in_tail = pos == offset;
            } else if let RunContent::Text(t) = piece {
                let at = offset - pos;
                head.push(RunContent::Text(t[..at].to_string()));
                tail.push(RunContent::Text(t[at..].to_string()));
                in_tail = true;
            } else {
                // width <= 1 for every non-text piece, so the offset can
                // never land inside one
                unreachable!("offset inside an indivisible run piece");
            }
        }

        self.content = head;
        Ok(Run {
            properties: self.properties.clone(),
            content: tail,
            unknown_attrs: self.unknown_attrs.clone(),
            unknown_children: Vec::new(),
        })
    }

    fn check_boundary(&self, offset: usize) -> Result<()> {
        let mut pos = 0usize;
        for piece in &self.content {
            let width = piece.width();
            if offset < pos + width {
                if let RunContent::Text(t) = piece {
                    if !t.is_char_boundary(offset - pos) {
                        return Err(Error::NotCharBoundary(offset));
                    }
                }
                return Ok(());
            }
            pos += width;
        }
        Ok(())
    }

    /// Check if bold
    pub fn bold(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.bold).unwrap_or(false)
    }

    /// Check if italic
    pub fn italic(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.italic).unwrap_or(false)
    }

    /// Get font size in points (None if not specified)
    pub fn font_size_pt(&self) -> Option<f32> {
        self.properties.as_ref()?.size.map(|s| s as f32 / 2.0)
    }

    /// Get color (RGB hex string)
    pub fn color(&self) -> Option<&str> {
        self.properties.as_ref()?.color.as_deref()
    }

    /// Set bold
    pub fn set_bold(&mut self, bold: bool) {
        self.properties.get_or_insert_with(Default::default).bold = Some(bold);
    }

    /// Set italic
    pub fn set_italic(&mut self, italic: bool) {
        self.properties.get_or_insert_with(Default::default).italic = Some(italic);
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:r");
        for (key, value) in &self.unknown_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        let is_empty = self.properties.is_none()
            && self.content.is_empty()
            && self.unknown_children.is_empty();

        if is_empty {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;

            if let Some(props) = &self.properties {
                props.write_to(writer)?;
            }

            for content in &self.content {
                content.write_to(writer)?;
            }

            for child in &self.unknown_children {
                child.write_to(writer)?;
            }

            writer.write_event(Event::End(BytesEnd::new("w:r")))?;
        }

        Ok(())
    }
}

impl RunContent {
    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            RunContent::Text(text) => {
                let mut start = BytesStart::new("w:t");
                // Word drops unprotected edge whitespace
                if text.starts_with(' ') || text.ends_with(' ') || text.contains("  ") {
                    start.push_attribute(("xml:space", "preserve"));
                }
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(text)))?;
                writer.write_event(Event::End(BytesEnd::new("w:t")))?;
            }
            RunContent::Tab => {
                writer.write_event(Event::Empty(BytesStart::new("w:tab")))?;
            }
            RunContent::Break(break_type) => {
                let mut start = BytesStart::new("w:br");
                match break_type {
                    BreakType::Page => start.push_attribute(("w:type", "page")),
                    BreakType::Column => start.push_attribute(("w:type", "column")),
                    BreakType::TextWrapping => {}
                }
                writer.write_event(Event::Empty(start))?;
            }
            RunContent::CarriageReturn => {
                writer.write_event(Event::Empty(BytesStart::new("w:cr")))?;
            }
            RunContent::SoftHyphen => {
                writer.write_event(Event::Empty(BytesStart::new("w:softHyphen")))?;
            }
            RunContent::NoBreakHyphen => {
                writer.write_event(Event::Empty(BytesStart::new("w:noBreakHyphen")))?;
            }
            RunContent::Unknown(node) => {
                node.write_to(writer)?;
            }
        }
        Ok(())
    }
}

impl RunProperties {
    /// Parse from reader (after w:rPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = RunProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"rFonts" => {
                        props.read_fonts(&e);
                        crate::xml::skip_element(reader, &e)?;
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        props.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"rStyle" => {
                        props.style = get_w_val(&e);
                    }
                    b"rFonts" => {
                        props.read_fonts(&e);
                    }
                    b"b" => {
                        props.bold = Some(parse_bool(&e));
                    }
                    b"i" => {
                        props.italic = Some(parse_bool(&e));
                    }
                    b"u" => {
                        props.underline = get_w_val(&e).or(Some("single".into()));
                    }
                    b"strike" => {
                        props.strike = Some(parse_bool(&e));
                    }
                    b"dstrike" => {
                        props.double_strike = Some(parse_bool(&e));
                    }
                    b"sz" => {
                        props.size = get_w_val(&e).and_then(|v| v.parse().ok());
                    }
                    b"color" => {
                        props.color = get_w_val(&e);
                    }
                    b"highlight" => {
                        props.highlight = get_w_val(&e);
                    }
                    b"vertAlign" => {
                        props.vertical_align = get_w_val(&e);
                    }
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        props.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"rPr" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(props)
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let has_content = self.style.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.strike.is_some()
            || self.double_strike.is_some()
            || self.size.is_some()
            || self.color.is_some()
            || self.highlight.is_some()
            || self.has_fonts()
            || self.vertical_align.is_some()
            || !self.unknown_children.is_empty();

        if !has_content {
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

        if let Some(style) = &self.style {
            let mut elem = BytesStart::new("w:rStyle");
            elem.push_attribute(("w:val", style.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        if self.has_fonts() {
            let mut elem = BytesStart::new("w:rFonts");
            for script in [
                FontScript::Latin,
                FontScript::HighAnsi,
                FontScript::EastAsia,
                FontScript::ComplexScript,
            ] {
                if let Some(font) = self.font(script) {
                    elem.push_attribute((script.attr_name(), font));
                }
            }
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(bold) = self.bold {
            let mut elem = BytesStart::new("w:b");
            if !bold {
                elem.push_attribute(("w:val", "0"));
            }
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(italic) = self.italic {
            let mut elem = BytesStart::new("w:i");
            if !italic {
                elem.push_attribute(("w:val", "0"));
            }
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(strike) = self.strike {
            let mut elem = BytesStart::new("w:strike");
            if !strike {
                elem.push_attribute(("w:val", "0"));
            }
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(dstrike) = self.double_strike {
            let mut elem = BytesStart::new("w:dstrike");
            if !dstrike {
                elem.push_attribute(("w:val", "0"));
            }
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(underline) = &self.underline {
            let mut elem = BytesStart::new("w:u");
            elem.push_attribute(("w:val", underline.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(color) = &self.color {
            let mut elem = BytesStart::new("w:color");
            elem.push_attribute(("w:val", color.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(size) = self.size {
            let mut elem = BytesStart::new("w:sz");
            elem.push_attribute(("w:val", size.to_string().as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(highlight) = &self.highlight {
            let mut elem = BytesStart::new("w:highlight");
            elem.push_attribute(("w:val", highlight.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(valign) = &self.vertical_align {
            let mut elem = BytesStart::new("w:vertAlign");
            elem.push_attribute(("w:val", valign.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        Ok(())
    }
}

/// Read text content from w:t element
fn read_text_content<R: BufRead>(reader: &mut Reader<R>) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => {
                text.push_str(&t.unescape()?);
            }
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"t" {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bold_run(text: &str) -> Run {
        let mut run = Run::new(text);
        run.set_bold(true);
        run
    }

    #[test]
    fn test_set_text_keeps_properties() {
        let mut run = bold_run("before");
        run.set_text("after");
        assert_eq!(run.text(), "after");
        assert!(run.bold());
    }

    #[test]
    fn test_split_off_preserves_text_and_formatting() {
        let original = bold_run("Hello World");
        for offset in 1..original.text_len() {
            let mut head = original.clone();
            let tail = head.split_off(offset).unwrap();
            assert_eq!(format!("{}{}", head.text(), tail.text()), "Hello World");
            assert!(head.bold());
            assert!(tail.bold());
        }
    }

    #[test]
    fn test_split_off_rejects_edges() {
        let mut run = Run::new("abc");
        assert!(matches!(
            run.split_off(0),
            Err(crate::Error::SplitOutOfRange { offset: 0, len: 3 })
        ));
        assert!(matches!(
            run.split_off(3),
            Err(crate::Error::SplitOutOfRange { offset: 3, len: 3 })
        ));
        assert_eq!(run.text(), "abc");
    }

    #[test]
    fn test_split_off_rejects_non_char_boundary() {
        let mut run = Run::new("héllo");
        // 'é' occupies bytes 1..3
        assert!(matches!(run.split_off(2), Err(crate::Error::NotCharBoundary(2))));
        assert_eq!(run.text(), "héllo");
    }

    #[test]
    fn test_split_off_across_pieces() {
        let mut run = Run::new("ab");
        run.content.push(RunContent::Tab);
        run.content.push(RunContent::Text("cd".into()));
        assert_eq!(run.text(), "ab\tcd");

        let tail = run.split_off(3).unwrap();
        assert_eq!(run.text(), "ab\t");
        assert_eq!(tail.text(), "cd");
    }

    struct FailingWriter;

    impl std::io::Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "broken pipe"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_propagates_as_io() {
        let run = Run::new("text");
        let mut writer = Writer::new(FailingWriter);
        assert!(matches!(run.write_to(&mut writer), Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_font_name_per_script() {
        let mut run = Run::new("text");
        assert_eq!(run.font_name(FontScript::Latin), None);

        run.set_font_name(FontScript::Latin, "Times New Roman");
        run.set_font_name(FontScript::EastAsia, "SimSun");
        run.set_font_name(FontScript::ComplexScript, "Arial");

        assert_eq!(run.font_name(FontScript::Latin), Some("Times New Roman"));
        assert_eq!(run.font_name(FontScript::EastAsia), Some("SimSun"));
        assert_eq!(run.font_name(FontScript::ComplexScript), Some("Arial"));
        assert_eq!(run.font_name(FontScript::HighAnsi), None);
    }

    #[test]
    fn test_rename_font_via_table() {
        let mut run = Run::new("text");
        run.set_font_name(FontScript::EastAsia, "SimSun");

        let renames: HashMap<String, String> =
            [("SimSun".to_string(), "SimHei".to_string())].into();

        assert_eq!(run.rename_font(FontScript::EastAsia, &renames), Some("SimHei".into()));
        assert_eq!(run.font_name(FontScript::EastAsia), Some("SimHei"));

        // name not in the table: no-op
        assert_eq!(run.rename_font(FontScript::EastAsia, &renames), None);
        assert_eq!(run.font_name(FontScript::EastAsia), Some("SimHei"));

        // script with no font set: no-op
        assert_eq!(run.rename_font(FontScript::Latin, &renames), None);
    }
}

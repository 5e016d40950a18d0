//! Paragraph element (w:p) and run-level splicing

use crate::document::Run;
use crate::error::{Error, Result};
use crate::xml::{attrs, get_attr, get_w_val, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;
use std::ops::Range;

/// Paragraph element (w:p)
///
/// Direct runs are the editable units. Bookmarks and any other children
/// (hyperlinks, fields, custom XML) are preserved verbatim and never touched
/// by the splicing operations.
#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    /// Paragraph properties
    pub properties: Option<ParagraphProperties>,
    /// Paragraph content (runs, bookmarks, preserved elements)
    pub content: Vec<ParagraphContent>,
    /// Unknown attributes (preserved for round-trip)
    pub unknown_attrs: Vec<(String, String)>,
    /// Unknown children (preserved for round-trip)
    pub unknown_children: Vec<RawXmlNode>,
}

/// Content within a paragraph
#[derive(Clone, Debug)]
pub enum ParagraphContent {
    /// Text run
    Run(Run),
    /// Bookmark start
    BookmarkStart { id: String, name: String },
    /// Bookmark end
    BookmarkEnd { id: String },
    /// Unknown element (preserved)
    Unknown(RawXmlNode),
}

/// Paragraph properties (w:pPr)
#[derive(Clone, Debug, Default)]
pub struct ParagraphProperties {
    /// Style ID
    pub style: Option<String>,
    /// Justification/alignment
    pub justification: Option<String>,
    /// Unknown children (preserved)
    pub unknown_children: Vec<RawXmlNode>,
}

impl Paragraph {
    /// Create a new paragraph with text
    pub fn new(text: impl Into<String>) -> Self {
        Paragraph {
            content: vec![ParagraphContent::Run(Run::new(text))],
            ..Default::default()
        }
    }

    /// Parse paragraph from reader (after w:p start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut para = Paragraph {
            unknown_attrs: attrs(start),
            ..Default::default()
        };

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"pPr" => {
                        para.properties = Some(ParagraphProperties::from_reader(reader)?);
                    }
                    b"r" => {
                        let run = Run::from_reader(reader, &e)?;
                        para.content.push(ParagraphContent::Run(run));
                    }
                    b"bookmarkStart" => {
                        para.content.push(read_bookmark_start(&e));
                        crate::xml::skip_element(reader, &e)?;
                    }
                    b"bookmarkEnd" => {
                        para.content.push(read_bookmark_end(&e));
                        crate::xml::skip_element(reader, &e)?;
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        para.content.push(ParagraphContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"r" => {
                        para.content.push(ParagraphContent::Run(Run::from_empty(&e)));
                    }
                    b"bookmarkStart" => {
                        para.content.push(read_bookmark_start(&e));
                    }
                    b"bookmarkEnd" => {
                        para.content.push(read_bookmark_end(&e));
                    }
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        para.content.push(ParagraphContent::Unknown(RawXmlNode::Element(raw)));
                    }
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"p" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(para)
    }

    /// Create from empty element
    pub fn from_empty(start: &BytesStart) -> Self {
        Paragraph {
            unknown_attrs: attrs(start),
            ..Default::default()
        }
    }

    /// Visible text: the in-order concatenation of the direct runs' text
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text()).collect()
    }

    /// Get style ID
    pub fn style(&self) -> Option<&str> {
        self.properties.as_ref()?.style.as_deref()
    }

    /// Iterate the direct runs in document order
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|c| match c {
            ParagraphContent::Run(r) => Some(r),
            _ => None,
        })
    }

    /// Iterate the direct runs mutably
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.content.iter_mut().filter_map(|c| match c {
            ParagraphContent::Run(r) => Some(r),
            _ => None,
        })
    }

    /// Number of direct runs
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Get a run by index
    pub fn run(&self, index: usize) -> Option<&Run> {
        self.runs().nth(index)
    }

    /// Get a run by index, mutably
    pub fn run_mut(&mut self, index: usize) -> Option<&mut Run> {
        self.runs_mut().nth(index)
    }

    /// Add a run at the end of this paragraph
    pub fn add_run(&mut self, run: Run) {
        self.content.push(ParagraphContent::Run(run));
    }

    /// Set style
    pub fn set_style(&mut self, style: impl Into<String>) {
        self.properties.get_or_insert_with(Default::default).style = Some(style.into());
    }

    /// Insert a run immediately after the run at `run_idx`.
    ///
    /// Returns the inserted run's index.
    pub fn insert_run_after(&mut self, run_idx: usize, run: Run) -> Result<usize> {
        let ci = self.content_index_of_run(run_idx)?;
        self.content.insert(ci + 1, ParagraphContent::Run(run));
        Ok(run_idx + 1)
    }

    /// Insert a text run after the run at `run_idx`, inheriting its properties
    pub fn insert_text_after(&mut self, run_idx: usize, text: impl Into<String>) -> Result<usize> {
        let properties = self
            .run(run_idx)
            .ok_or(Error::RunIndexOutOfRange {
                index: run_idx,
                count: self.run_count(),
            })?
            .properties
            .clone();
        self.insert_run_after(run_idx, Run::with_properties(text, properties))
    }

    /// Detach and return the run at `run_idx`.
    ///
    /// Sibling content (bookmarks, preserved elements) is untouched.
    pub fn remove_run(&mut self, run_idx: usize) -> Result<Run> {
        let ci = self.content_index_of_run(run_idx)?;
        match self.content.remove(ci) {
            ParagraphContent::Run(run) => Ok(run),
            _ => unreachable!("content index resolved to a non-run"),
        }
    }

    /// Split the run at `run_idx` into two runs at a byte offset of its text.
    ///
    /// Both halves carry the original formatting; their concatenated text
    /// equals the original run's text.
    pub fn split_run_at(&mut self, run_idx: usize, offset: usize) -> Result<()> {
        let count = self.run_count();
        let tail = self
            .run_mut(run_idx)
            .ok_or(Error::RunIndexOutOfRange { index: run_idx, count })?
            .split_off(offset)?;
        self.insert_run_after(run_idx, tail)?;
        Ok(())
    }

    /// Byte offsets of run boundaries in the paragraph text.
    ///
    /// `boundaries()[k]` is the offset where run `k` starts; the final entry
    /// is the total text length.
    pub fn run_boundaries(&self) -> Vec<usize> {
        let mut bounds = Vec::with_capacity(self.run_count() + 1);
        let mut pos = 0usize;
        bounds.push(pos);
        for run in self.runs() {
            pos += run.text_len();
            bounds.push(pos);
        }
        bounds
    }

    /// Split runs so the byte range `span` of the paragraph text aligns
    /// exactly with run boundaries.
    ///
    /// Returns the run-index range covering exactly that text. A span already
    /// aligned with run boundaries splits nothing. Text and formatting are
    /// never altered, only run boundaries.
    pub fn isolate_span(&mut self, span: Range<usize>) -> Result<Range<usize>> {
        let bounds = self.run_boundaries();
        let len = *bounds.last().unwrap_or(&0);
        if span.start > span.end || span.end > len {
            return Err(Error::SpanOutOfRange {
                start: span.start,
                end: span.end,
                len,
            });
        }

        // Empty spans have nothing to isolate.
        if span.start == span.end {
            let k = bounds.partition_point(|&b| b < span.start);
            return Ok(k..k);
        }

        // First boundary at or past each span edge; an edge falling inside
        // run k-1 lands on boundary index k after the split below.
        let start_run = bounds.partition_point(|&b| b < span.start);
        let mut end_run = bounds.partition_point(|&b| b < span.end);

        // Split the end first so start offsets stay valid.
        if span.end != bounds[end_run] {
            self.split_run_at(end_run - 1, span.end - bounds[end_run - 1])?;
        }
        if span.start != bounds[start_run] {
            self.split_run_at(start_run - 1, span.start - bounds[start_run - 1])?;
            end_run += 1;
        }

        Ok(start_run..end_run)
    }

    /// Replace the runs in `range` (run indices) with `replacement`.
    ///
    /// Non-run content interleaved in the range is kept, after the
    /// replacement runs.
    pub(crate) fn splice_runs(&mut self, range: Range<usize>, replacement: Vec<Run>) -> Result<()> {
        let insert_at = if range.is_empty() {
            self.content.len()
        } else {
            self.content_index_of_run(range.start)?
        };
        for run_idx in range.rev() {
            let ci = self.content_index_of_run(run_idx)?;
            self.content.remove(ci);
        }
        for (i, run) in replacement.into_iter().enumerate() {
            self.content.insert(insert_at + i, ParagraphContent::Run(run));
        }
        Ok(())
    }

    fn content_index_of_run(&self, run_idx: usize) -> Result<usize> {
        let mut seen = 0usize;
        for (ci, content) in self.content.iter().enumerate() {
            if let ParagraphContent::Run(_) = content {
                if seen == run_idx {
                    return Ok(ci);
                }
                seen += 1;
            }
        }
        Err(Error::RunIndexOutOfRange {
            index: run_idx,
            count: seen,
        })
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:p");
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

            writer.write_event(Event::End(BytesEnd::new("w:p")))?;
        }

        Ok(())
    }
}

impl ParagraphContent {
    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            ParagraphContent::Run(run) => run.write_to(writer),
            ParagraphContent::BookmarkStart { id, name } => {
                let mut elem = BytesStart::new("w:bookmarkStart");
                elem.push_attribute(("w:id", id.as_str()));
                elem.push_attribute(("w:name", name.as_str()));
                writer.write_event(Event::Empty(elem))?;
                Ok(())
            }
            ParagraphContent::BookmarkEnd { id } => {
                let mut elem = BytesStart::new("w:bookmarkEnd");
                elem.push_attribute(("w:id", id.as_str()));
                writer.write_event(Event::Empty(elem))?;
                Ok(())
            }
            ParagraphContent::Unknown(node) => node.write_to(writer),
        }
    }
}

impl ParagraphProperties {
    /// Parse from reader (after w:pPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = ParagraphProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let raw = RawXmlElement::from_reader(reader, &e)?;
                    props.unknown_children.push(RawXmlNode::Element(raw));
                }
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"pStyle" => {
                        props.style = get_w_val(&e);
                    }
                    b"jc" => {
                        props.justification = get_w_val(&e);
                    }
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        props.unknown_children.push(RawXmlNode::Element(raw));
                    }
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"pPr" {
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
            || self.justification.is_some()
            || !self.unknown_children.is_empty();

        if !has_content {
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

        if let Some(style) = &self.style {
            let mut elem = BytesStart::new("w:pStyle");
            elem.push_attribute(("w:val", style.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        if let Some(jc) = &self.justification {
            let mut elem = BytesStart::new("w:jc");
            elem.push_attribute(("w:val", jc.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        Ok(())
    }
}

fn read_bookmark_start(e: &BytesStart) -> ParagraphContent {
    let id = get_attr(e, "w:id")
        .or_else(|| get_attr(e, "id"))
        .unwrap_or_default();
    let name = get_attr(e, "w:name")
        .or_else(|| get_attr(e, "name"))
        .unwrap_or_default();
    ParagraphContent::BookmarkStart { id, name }
}

fn read_bookmark_end(e: &BytesStart) -> ParagraphContent {
    let id = get_attr(e, "w:id")
        .or_else(|| get_attr(e, "id"))
        .unwrap_or_default();
    ParagraphContent::BookmarkEnd { id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn para(texts: &[&str]) -> Paragraph {
        let mut p = Paragraph::default();
        for t in texts {
            p.add_run(Run::new(*t));
        }
        p
    }

    fn run_texts(p: &Paragraph) -> Vec<String> {
        p.runs().map(|r| r.text()).collect()
    }

    #[test]
    fn test_split_run_at() {
        let mut p = para(&["Hello World"]);
        p.split_run_at(0, 5).unwrap();
        assert_eq!(run_texts(&p), vec!["Hello", " World"]);
        assert_eq!(p.text(), "Hello World");
    }

    #[test]
    fn test_split_run_at_bad_index() {
        let mut p = para(&["abc"]);
        assert!(matches!(
            p.split_run_at(1, 1),
            Err(Error::RunIndexOutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn test_remove_run_keeps_siblings() {
        let mut p = para(&["a", "b", "c"]);
        p.content.insert(
            1,
            ParagraphContent::BookmarkStart {
                id: "0".into(),
                name: "mark".into(),
            },
        );

        let removed = p.remove_run(1).unwrap();
        assert_eq!(removed.text(), "b");
        assert_eq!(run_texts(&p), vec!["a", "c"]);
        assert!(p
            .content
            .iter()
            .any(|c| matches!(c, ParagraphContent::BookmarkStart { .. })));
    }

    #[test]
    fn test_insert_text_after_inherits_properties() {
        let mut p = Paragraph::default();
        let mut run = Run::new("bold");
        run.set_bold(true);
        p.add_run(run);

        let idx = p.insert_text_after(0, " and more").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(p.text(), "bold and more");
        assert!(p.run(1).unwrap().bold());
    }

    #[test]
    fn test_isolate_span_across_two_runs() {
        // "Hel|lo W|orld" with span 4..8 ("o Wo")
        let mut p = para(&["Hel", "lo W", "orld"]);
        let runs = p.isolate_span(4..8).unwrap();
        assert_eq!(runs, 2..4);
        assert_eq!(run_texts(&p), vec!["Hel", "l", "o W", "o", "rld"]);
        assert_eq!(p.text(), "Hello World");

        let bounds = p.run_boundaries();
        assert_eq!(bounds[runs.start], 4);
        assert_eq!(bounds[runs.end], 8);
    }

    #[test]
    fn test_isolate_span_already_aligned() {
        let mut p = para(&["ab", "cd", "ef"]);
        let runs = p.isolate_span(2..4).unwrap();
        assert_eq!(runs, 1..2);
        assert_eq!(run_texts(&p), vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn test_isolate_span_whole_paragraph() {
        let mut p = para(&["ab", "cd"]);
        let runs = p.isolate_span(0..4).unwrap();
        assert_eq!(runs, 0..2);
        assert_eq!(run_texts(&p), vec!["ab", "cd"]);
    }

    #[test]
    fn test_isolate_span_out_of_range() {
        let mut p = para(&["ab"]);
        assert!(matches!(
            p.isolate_span(1..5),
            Err(Error::SpanOutOfRange { start: 1, end: 5, len: 2 })
        ));
    }

    #[test]
    fn test_splice_runs() {
        let mut p = para(&["The ", "cat", " sat"]);
        p.splice_runs(1..2, vec![Run::new("dog")]).unwrap();
        assert_eq!(p.text(), "The dog sat");
        assert_eq!(run_texts(&p), vec!["The ", "dog", " sat"]);
    }
}

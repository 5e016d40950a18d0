//! XML utilities and raw element preservation for round-trip support

mod namespace;
mod raw;

pub use namespace::*;
pub use raw::{RawXmlElement, RawXmlNode};

use crate::error::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Helper to get attribute value from BytesStart
pub fn get_attr(element: &BytesStart, name: &str) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name.as_bytes())
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Helper to get w:val attribute (common in OOXML)
pub fn get_w_val(element: &BytesStart) -> Option<String> {
    get_attr(element, "w:val").or_else(|| get_attr(element, "val"))
}

/// Parse a boolean value from OOXML (handles "1", "true", "on", or missing val)
pub fn parse_bool(element: &BytesStart) -> bool {
    match get_w_val(element) {
        None => true, // No val attribute means true (e.g., <w:b/>)
        Some(v) => matches!(v.as_str(), "1" | "true" | "on"),
    }
}

/// Collect all attributes of an element as (name, value) pairs
pub fn attrs(element: &BytesStart) -> Vec<(String, String)> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            (
                String::from_utf8_lossy(a.key.as_ref()).to_string(),
                String::from_utf8_lossy(&a.value).to_string(),
            )
        })
        .collect()
}

/// Skip an element and all its children
pub(crate) fn skip_element<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<()> {
    let target = start.name().as_ref().to_vec();
    let mut depth = 1;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == target => depth += 1,
            Event::End(e) if e.name().as_ref() == target => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

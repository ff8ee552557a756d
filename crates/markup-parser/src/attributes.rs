//! Attribute Parsing
//!
//! Pulls `name="value"` pairs out of the raw text of an opening tag.

use std::collections::BTreeMap;

use crate::scan::{TAG_SCANNER, find_char, skip_whitespace};

/// Attribute name to value
pub type Attributes = BTreeMap<String, String>;

/// Parse raw attribute text into a map.
///
/// Recognizes `name = "value"` with optional whitespace around `=` and a
/// double-quoted value. Anything else is skipped. A repeated name keeps the
/// last value.
pub fn parse_attributes(raw: &str) -> Attributes {
    let bytes = raw.as_bytes();
    let mut attributes = Attributes::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if !TAG_SCANNER.is_name_char(bytes[pos]) {
            pos += 1;
            continue;
        }

        let name_end = TAG_SCANNER.scan_name(bytes, pos);
        match match_quoted_value(raw, name_end) {
            Some((value, end)) => {
                attributes.insert(raw[pos..name_end].to_owned(), value.to_owned());
                pos = end;
            }
            None => pos = name_end,
        }
    }

    attributes
}

/// Match `= "value"` at `start`, returning the value and the offset past the closing quote
fn match_quoted_value(raw: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = raw.as_bytes();

    let mut pos = skip_whitespace(bytes, start);
    if bytes.get(pos) != Some(&b'=') {
        return None;
    }

    pos = skip_whitespace(bytes, pos + 1);
    if bytes.get(pos) != Some(&b'"') {
        return None;
    }

    let value_start = pos + 1;
    let value_len = find_char(&bytes[value_start..], b'"')?;
    let value_end = value_start + value_len;

    Some((&raw[value_start..value_end], value_end + 1))
}

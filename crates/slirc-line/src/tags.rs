//! IRCv3 message tag value escaping.

use std::fmt::{Result as FmtResult, Write};

/// Raw character and its escaped wire form.
const ESCAPES: [(char, &str); 5] = [
    (';', "\\:"),
    (' ', "\\s"),
    ('\\', "\\\\"),
    ('\r', "\\r"),
    ('\n', "\\n"),
];

/// Write `value` to `f` in escaped wire form.
pub fn escape_tag_value(f: &mut dyn Write, value: &str) -> FmtResult {
    for c in value.chars() {
        match ESCAPES.iter().find(|(raw, _)| *raw == c) {
            Some((_, escaped)) => f.write_str(escaped)?,
            None => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Decode a tag value from wire form.
///
/// An unknown escape keeps the escaped character; a lone trailing backslash
/// is dropped.
pub fn unescape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(code) = chars.next() else {
            break;
        };
        let raw = ESCAPES
            .iter()
            .find(|(_, escaped)| escaped.ends_with(code))
            .map_or(code, |(raw, _)| *raw);
        out.push(raw);
    }
    out
}

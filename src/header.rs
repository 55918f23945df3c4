//! Header table and the header block tokenizer.

use std::collections::HashMap;

/// Ordered, case-insensitive multi-map from header name to raw values.
///
/// Duplicate names keep every occurrence in encounter order; values are never
/// merged or overwritten. Lookups compare names ASCII case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct HeaderTable {
    entries: HashMap<String, Vec<String>>,
}

impl HeaderTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one raw value under `name`.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// First value recorded for `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value recorded for `name`, in encounter order.
    ///
    /// Returns an empty slice when the name was never seen.
    pub fn all(&self, name: &str) -> &[String] {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reports whether at least one value was recorded for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    /// Number of distinct header names in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the table holds no headers at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tokenizes one header block.
///
/// `block` is assumed to start at the first header line. Returns the populated
/// table together with the offset of the first body byte: the byte after the
/// blank line terminating the block, or `block.len()` when the range ends
/// first.
///
/// Folded values keep the embedded line break and the continuation line's
/// leading whitespace verbatim. A value still pending when the range ends
/// without a blank line is flushed as a final value rather than dropped. One
/// trailing `\r` is trimmed from each value so CRLF mail reads like LF mail.
pub(crate) fn parse_header_block(block: &[u8]) -> (HeaderTable, usize) {
    let len = block.len();
    let mut table = HeaderTable::new();

    let mut i = 0;
    let mut line_start = 0;
    // `Some` while scanning a value, holding the current header's name.
    let mut name: Option<&[u8]> = None;
    let mut value_start = 0;

    while i < len {
        let b = block[i];
        match name {
            None => {
                // reading-name
                if b == b':' {
                    name = Some(&block[line_start..i]);
                    value_start = i + 1;
                    if block.get(value_start) == Some(&b' ') {
                        value_start += 1;
                    }
                    i = value_start;
                    continue;
                }
                if b == b'\n' {
                    // An empty line (or a lone `\r`) before any colon still
                    // ends the block, even as the block's very first line.
                    if i == line_start || (i == line_start + 1 && block[line_start] == b'\r') {
                        return (table, i + 1);
                    }
                    line_start = i + 1;
                }
            }
            Some(n) => {
                // reading-value
                if b == b'\n' && i + 1 < len {
                    match block[i + 1] {
                        // Folded continuation; the newline stays in the value.
                        b' ' | b'\t' => {}
                        b'\n' => {
                            flush(&mut table, n, &block[value_start..i]);
                            return (table, i + 2);
                        }
                        b'\r' => {
                            flush(&mut table, n, &block[value_start..i]);
                            return (table, blank_line_end(block, i));
                        }
                        _ => {
                            flush(&mut table, n, &block[value_start..i]);
                            name = None;
                            line_start = i + 1;
                        }
                    }
                }
            }
        }
        i += 1;
    }

    // The range ended while a value was still pending: no blank-line
    // terminator. Keep the trailing value.
    if let Some(n) = name {
        flush(&mut table, n, &block[value_start..len]);
    }
    (table, len)
}

/// Offset of the first body byte given a `\n` at `i` followed by `\r`.
fn blank_line_end(block: &[u8], i: usize) -> usize {
    if block.get(i + 2) == Some(&b'\n') {
        i + 3
    } else {
        i + 2
    }
}

fn flush(table: &mut HeaderTable, name: &[u8], raw: &[u8]) {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    let name = String::from_utf8_lossy(name);
    let value = String::from_utf8_lossy(raw).into_owned();
    table.append(name.as_ref(), value);
}

//! Top-level message container and parsing entry points.

use std::fs;
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::error::{Error, Result};
use crate::header::{self, HeaderTable};
use crate::part::{self, Part};

/// Headers the synthetic root part inherits from the message.
const ROOT_HEADERS: [&str; 2] = ["Content-Type", "Content-Disposition"];

/// A parsed mail message: its top-level headers and, for multipart messages,
/// the root of the body part tree.
///
/// The message keeps the input buffer alive; every [`Part`] holds a zero-copy
/// refcounted slice of it. Dropping the message tears down the part tree and
/// header tables, and the buffer itself is released once the last view of it
/// is gone. Once built, a message is immutable and safe to share across
/// threads for reading.
#[derive(Debug, Clone)]
pub struct Message {
    root: Option<Part>,
    headers: HeaderTable,
    buffer: Bytes,
}

/// Parses an in-memory message buffer.
///
/// Never fails: malformed MIME degrades to fewer headers or parts, not to an
/// error.
///
/// # Examples
///
/// ```
/// let message = mimetree::parse(&b"Subject: Hello\nFrom: a@b\n\nBody"[..]);
/// assert_eq!(message.get_first_header("Subject"), Some("Hello"));
/// assert_eq!(message.get_first_header("From"), Some("a@b"));
/// assert!(message.root().is_none());
/// ```
pub fn parse(buffer: impl Into<Bytes>) -> Message {
    Message::parse(buffer.into())
}

/// Reads a message from a file and parses it.
///
/// The file's contents become the message's buffer, released when the
/// message and every part cloned out of it are dropped.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Message> {
    Message::from_file(path)
}

impl Message {
    /// Parses `buffer` into a message. See the crate-level [`parse`].
    pub fn parse(buffer: Bytes) -> Self {
        let (headers, body_offset) = header::parse_header_block(&buffer);

        let root = part::multipart_content_type(&headers)
            .map(|ctype| build_root(&buffer, &headers, body_offset, ctype));
        debug!(
            len = buffer.len(),
            multipart = root.is_some(),
            "message parsed"
        );

        Self {
            root,
            headers,
            buffer,
        }
    }

    /// Reads and parses a message from a file. See [`parse_file`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|source| Error::Source {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::parse(Bytes::from(contents)))
    }

    /// The message's top-level header table.
    pub fn headers(&self) -> &HeaderTable {
        &self.headers
    }

    /// The root body part. Present if and only if the message's Content-Type
    /// begins with `multipart/`.
    pub fn root(&self) -> Option<&Part> {
        self.root.as_ref()
    }

    /// Total length of the underlying buffer in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Reports whether the message buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// First raw value of `name`, if present. Case-insensitive.
    pub fn get_first_header(&self, name: &str) -> Option<&str> {
        self.headers.first(name)
    }

    /// Every raw value of `name`, in encounter order.
    pub fn get_all_headers(&self, name: &str) -> &[String] {
        self.headers.all(name)
    }
}

/// Builds the synthetic root part of a multipart message with the given
/// (already multipart) Content-Type value.
fn build_root(buffer: &Bytes, headers: &HeaderTable, body_offset: usize, ctype: &str) -> Part {
    // The top level skips whitespace between the header block and the first
    // boundary once; nested parts do not.
    let mut start = body_offset;
    while start < buffer.len() && buffer[start].is_ascii_whitespace() {
        start += 1;
    }
    let raw = buffer.slice(start..);

    let mut root_headers = HeaderTable::new();
    for name in ROOT_HEADERS {
        if let Some(value) = headers.first(name) {
            root_headers.append(name, value);
        }
    }

    let children = part::split_parts(raw.clone(), ctype);
    Part::synthetic_root(raw, root_headers, children)
}

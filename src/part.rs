//! MIME body parts and the recursive multipart splitter.

use bytes::Bytes;
use memchr::memmem;
use tracing::{debug, trace};

use crate::attributes;
use crate::grammar;
use crate::header::{self, HeaderTable};

/// One node of the MIME body tree.
///
/// A part is a zero-copy view into the message buffer covering its header
/// block followed by its content. Children are present only when the part's
/// own Content-Type is `multipart/*`. The tree is immutable once built.
#[derive(Debug, Clone)]
pub struct Part {
    raw: Bytes,
    body_offset: usize,
    headers: HeaderTable,
    children: Vec<Part>,
}

impl Part {
    /// Parses one part out of `raw`: its header block first, then, when the
    /// part declares a multipart Content-Type, its children.
    pub(crate) fn parse(raw: Bytes) -> Self {
        let (headers, body_offset) = header::parse_header_block(&raw);
        let children = match multipart_content_type(&headers) {
            Some(ctype) => split_parts(raw.slice(body_offset..), ctype),
            None => Vec::new(),
        };
        Self {
            raw,
            body_offset,
            headers,
            children,
        }
    }

    /// Root part synthesized for a multipart message.
    ///
    /// Its headers are the message's own Content-Type and Content-Disposition
    /// so type and disposition predicates on the root reflect the message's
    /// declared type; its range is the whole message body.
    pub(crate) fn synthetic_root(raw: Bytes, headers: HeaderTable, children: Vec<Part>) -> Self {
        Self {
            raw,
            body_offset: 0,
            headers,
            children,
        }
    }

    /// Raw bytes of this part, header block included.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Length in bytes of the part's raw range.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Reports whether the part's raw range is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The part's content past its own header block, as a zero-copy slice.
    pub fn body(&self) -> Bytes {
        self.raw.slice(self.body_offset..)
    }

    /// This part's header table.
    pub fn headers(&self) -> &HeaderTable {
        &self.headers
    }

    /// Child parts, in the order they appear in the body.
    pub fn children(&self) -> &[Part] {
        &self.children
    }

    /// First raw value of `name`, if present. Case-insensitive.
    pub fn get_first_header(&self, name: &str) -> Option<&str> {
        self.headers.first(name)
    }

    /// Every raw value of `name`, in encounter order.
    pub fn get_all_headers(&self, name: &str) -> &[String] {
        self.headers.all(name)
    }

    /// Matches the part's declared type and subtype, `*` accepting any value
    /// on that side. A part without a Content-Type header counts as
    /// `text/plain`.
    pub fn is_type(&self, ty: &str, subtype: &str) -> bool {
        let ctype = self.headers.first("Content-Type").unwrap_or("text/plain");
        let split = attributes::media_type(ctype);
        let t = ty == "*" || split.is_some_and(|(actual, _)| actual.eq_ignore_ascii_case(ty));
        let s = subtype == "*" || split.is_some_and(|(_, actual)| actual.eq_ignore_ascii_case(subtype));
        t && s
    }

    /// Reports whether the Content-Disposition value contains `token`,
    /// compared case-insensitively.
    ///
    /// This is a substring test, not a parameter match: `is_disposition("attachment")`
    /// also matches a value that merely mentions the word.
    pub fn is_disposition(&self, token: &str) -> bool {
        match self.headers.first("Content-Disposition") {
            Some(disposition) => grammar::contains_ignore_case(disposition, token),
            None => false,
        }
    }

    /// The part's filename, taken from the first `filename=`/`name=`
    /// parameter found in Content-Type, then Content-Disposition.
    pub fn filename(&self) -> Option<&str> {
        ["Content-Type", "Content-Disposition"]
            .iter()
            .find_map(|name| self.headers.first(name).and_then(attributes::filename))
    }
}

/// The header table's Content-Type value when it declares `multipart/*`.
pub(crate) fn multipart_content_type(headers: &HeaderTable) -> Option<&str> {
    let ctype = headers.first("Content-Type")?.trim_start();
    grammar::starts_with_ignore_case(ctype, "multipart/").then_some(ctype)
}

/// Splits a multipart body into child parts using its boundary token.
///
/// The scan looks for literal occurrences of the boundary substring. A
/// segment opened by a boundary that never recurs is dropped rather than
/// emitted, and a missing or empty boundary parameter yields zero children;
/// neither is an error, both are everyday malformed mail.
pub(crate) fn split_parts(body: Bytes, ctype: &str) -> Vec<Part> {
    let Some(token) = attributes::boundary(ctype) else {
        trace!(content_type = ctype, "multipart without usable boundary parameter");
        return Vec::new();
    };
    debug!(boundary = token, "splitting multipart body");

    let finder = memmem::Finder::new(token.as_bytes());
    let token_len = token.len();
    let mut children = Vec::new();

    let Some(mut begin) = finder.find(&body) else {
        return children;
    };
    loop {
        // One byte past the boundary token, conventionally its line terminator.
        let data = begin + token_len + 1;
        if data >= body.len() {
            debug!(parts = children.len(), "missing terminating boundary");
            break;
        }
        let Some(found) = finder.find(&body[data..]) else {
            debug!(parts = children.len(), "missing terminating boundary");
            break;
        };
        let end = data + found;

        children.push(Part::parse(body.slice(data..end)));
        trace!(offset = data, len = end - data, "added part");

        // `--` right after the closing occurrence marks the end of the body.
        if body.get(end + token_len) == Some(&b'-') && body.get(end + token_len + 1) == Some(&b'-') {
            break;
        }
        begin = end;
    }
    children
}

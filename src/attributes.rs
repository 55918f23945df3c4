//! Attribute extractors over a single raw header value.
//!
//! Three independent grammars: the `boundary` parameter of a Content-Type,
//! the type/subtype pair, and the `filename`/`name` parameter. Each is a
//! stateless scan over one header value, tolerant of the malformed forms
//! seen in real-world mail. Parameter names match ASCII case-insensitively.

use crate::grammar::GRAMMAR;

/// Extracts the `boundary` parameter from a Content-Type value.
///
/// Accepts `boundary=token` and `boundary="token"`, with optional whitespace
/// around the `=`. The bare form runs until whitespace or a quote; the quoted
/// form returns the interior, rejecting an empty one. Returns `None` when the
/// parameter is absent or yields an empty token.
///
/// # Examples
///
/// ```
/// use mimetree::attributes::boundary;
///
/// assert_eq!(boundary("multipart/mixed; boundary=XYZ"), Some("XYZ"));
/// assert_eq!(boundary("multipart/mixed; boundary=\"a b\""), Some("a b"));
/// assert_eq!(boundary("text/plain"), None);
/// ```
pub fn boundary(value: &str) -> Option<&str> {
    let bytes = value.as_bytes();
    let mut from = 0;
    while let Some(at) = GRAMMAR.boundary.find(bytes, from) {
        from = at + 1;

        let mut i = at + GRAMMAR.boundary.needle_len();
        while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
            i += 1;
        }

        if let Some(token) = parameter_value(value, i, b"") {
            return Some(token);
        }
    }
    None
}

/// Splits a Content-Type value into its type and subtype.
///
/// The split happens at the first `/` after trimming leading whitespace; the
/// subtype ends at the first `;` or whitespace. Returns `None` when the value
/// has no `/`.
pub fn media_type(value: &str) -> Option<(&str, &str)> {
    let value = value.trim_start();
    let (ty, rest) = value.split_once('/')?;
    let end = rest
        .find(|c: char| c == ';' || c.is_ascii_whitespace())
        .unwrap_or(rest.len());
    Some((ty, &rest[..end]))
}

/// Extracts a `filename=` or `name=` parameter from a raw header value.
///
/// Both the quoted and the bare form are accepted; the bare form ends at the
/// first `;`, whitespace or quote. Returns the first non-empty match.
///
/// # Examples
///
/// ```
/// use mimetree::attributes::filename;
///
/// assert_eq!(filename("attachment; filename=\"report.pdf\""), Some("report.pdf"));
/// assert_eq!(filename("attachment; name=report.pdf;"), Some("report.pdf"));
/// assert_eq!(filename("inline"), None);
/// ```
pub fn filename(value: &str) -> Option<&str> {
    let bytes = value.as_bytes();
    let mut from = 0;
    // `name=` also matches inside `filename=`, so one needle covers both.
    while let Some(at) = GRAMMAR.name.find(bytes, from) {
        from = at + 1;

        let i = at + GRAMMAR.name.needle_len();
        if let Some(name) = parameter_value(value, i, b";") {
            return Some(name);
        }
    }
    None
}

/// Reads a parameter value starting at byte offset `i`: either a quoted
/// string (non-empty interior up to the closing quote) or a bare token
/// running until whitespace, `"` or any byte in `bare_stops`. `None` when
/// empty or unterminated.
fn parameter_value<'a>(value: &'a str, i: usize, bare_stops: &[u8]) -> Option<&'a str> {
    let bytes = value.as_bytes();
    match bytes.get(i) {
        Some(&b'"') => {
            let start = i + 1;
            match memchr::memchr(b'"', &bytes[start..]) {
                Some(interior) if interior > 0 => Some(&value[start..start + interior]),
                _ => None,
            }
        }
        Some(_) => {
            let start = i;
            let mut end = i;
            while end < bytes.len()
                && !bytes[end].is_ascii_whitespace()
                && bytes[end] != b'"'
                && !bare_stops.contains(&bytes[end])
            {
                end += 1;
            }
            (end > start).then(|| &value[start..end])
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_bare() {
        assert_eq!(boundary("multipart/mixed; boundary=XYZ"), Some("XYZ"));
        assert_eq!(boundary("multipart/mixed;boundary=XYZ"), Some("XYZ"));
        assert_eq!(boundary("multipart/mixed; boundary = XYZ"), Some("XYZ"));
    }

    #[test]
    fn test_boundary_bare_token_keeps_semicolons() {
        // The bare form ends only at whitespace or a quote; a `;` is part of
        // the token. Only the filename grammar stops at `;`.
        assert_eq!(
            boundary("multipart/mixed; boundary=abc;def"),
            Some("abc;def")
        );
        assert_eq!(
            boundary("multipart/mixed; boundary=abc;def ghi"),
            Some("abc;def")
        );
    }

    #[test]
    fn test_boundary_quoted() {
        assert_eq!(
            boundary("multipart/alternative; boundary=\"=_a8904cd\""),
            Some("=_a8904cd")
        );
        assert_eq!(boundary("multipart/mixed; boundary=\"XYZ\";"), Some("XYZ"));
        assert_eq!(boundary("multipart/mixed; boundary=\"a b c\""), Some("a b c"));
    }

    #[test]
    fn test_boundary_caseless_parameter_name() {
        assert_eq!(boundary("multipart/mixed; BOUNDARY=XYZ"), Some("XYZ"));
        assert_eq!(boundary("multipart/mixed; Boundary=\"q\""), Some("q"));
    }

    #[test]
    fn test_boundary_rejects_empty_and_absent() {
        assert_eq!(boundary("multipart/mixed"), None);
        assert_eq!(boundary("multipart/mixed; boundary="), None);
        assert_eq!(boundary("multipart/mixed; boundary=\"\""), None);
        assert_eq!(boundary("multipart/mixed; boundary=\"unterminated"), None);
    }

    #[test]
    fn test_boundary_skips_false_starts() {
        // The first occurrence has no `=`; the scan keeps going.
        assert_eq!(
            boundary("x-boundaryish; boundary=real"),
            Some("real")
        );
    }

    #[test]
    fn test_media_type_split() {
        assert_eq!(media_type("text/plain"), Some(("text", "plain")));
        assert_eq!(media_type("text/plain; charset=us-ascii"), Some(("text", "plain")));
        assert_eq!(media_type("  text/plain"), Some(("text", "plain")));
        assert_eq!(media_type("multipart/mixed; boundary=x"), Some(("multipart", "mixed")));
    }

    #[test]
    fn test_media_type_subtype_ends_at_whitespace() {
        assert_eq!(media_type("text/plain extra"), Some(("text", "plain")));
    }

    #[test]
    fn test_media_type_without_slash() {
        assert_eq!(media_type("plain"), None);
        assert_eq!(media_type(""), None);
    }

    #[test]
    fn test_filename_quoted() {
        assert_eq!(
            filename("attachment; filename=\"report.pdf\""),
            Some("report.pdf")
        );
        assert_eq!(filename("attachment; name=\"r p.pdf\""), Some("r p.pdf"));
    }

    #[test]
    fn test_filename_bare_ends_at_semicolon() {
        assert_eq!(filename("attachment; name=report.pdf;"), Some("report.pdf"));
        assert_eq!(filename("attachment; filename=report.pdf"), Some("report.pdf"));
    }

    #[test]
    fn test_filename_absent_or_empty() {
        assert_eq!(filename("inline"), None);
        assert_eq!(filename("attachment; filename=\"\""), None);
        assert_eq!(filename("attachment; filename="), None);
    }

    #[test]
    fn test_filename_first_non_empty_wins() {
        assert_eq!(
            filename("attachment; filename=\"\"; name=fallback.txt"),
            Some("fallback.txt")
        );
    }
}

//! Scanning primitives for the attribute grammars.
//!
//! The extractors in [`attributes`](crate::attributes) are built from small
//! explicit scanners instead of a general pattern-matching engine, which
//! keeps the behavior auditable when the input is untrusted mail.

use once_cell::sync::Lazy;

/// Case-insensitive substring scanner for a fixed ASCII needle.
pub(crate) struct ParamScanner {
    needle: &'static [u8],
}

impl ParamScanner {
    fn new(needle: &'static [u8]) -> Self {
        Self { needle }
    }

    /// Length of the needle this scanner was built for.
    pub(crate) fn needle_len(&self) -> usize {
        self.needle.len()
    }

    /// Offset of the next occurrence of the needle at or after `from`,
    /// compared ASCII case-insensitively.
    pub(crate) fn find(&self, haystack: &[u8], from: usize) -> Option<usize> {
        let n = self.needle.len();
        if n == 0 || haystack.len() < n {
            return None;
        }
        (from..=haystack.len() - n).find(|&i| haystack[i..i + n].eq_ignore_ascii_case(self.needle))
    }
}

/// Process-wide attribute grammar state, built once on first use.
pub(crate) struct Grammar {
    /// Locates the `boundary` parameter name in a Content-Type value.
    pub(crate) boundary: ParamScanner,
    /// Locates `name=`, which also covers `filename=`.
    pub(crate) name: ParamScanner,
}

pub(crate) static GRAMMAR: Lazy<Grammar> = Lazy::new(|| Grammar {
    boundary: ParamScanner::new(b"boundary"),
    name: ParamScanner::new(b"name="),
});

/// Ensures the grammar state is built exactly once.
pub(crate) fn init() {
    Lazy::force(&GRAMMAR);
}

/// Reports whether `s` starts with `prefix`, compared ASCII case-insensitively.
pub(crate) fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    let (s, prefix) = (s.as_bytes(), prefix.as_bytes());
    s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Reports whether `haystack` contains `needle`, compared ASCII
/// case-insensitively. An empty needle always matches.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.is_empty() {
        return true;
    }
    h.len() >= n.len() && (0..=h.len() - n.len()).any(|i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

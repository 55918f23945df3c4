//! Zero-copy MIME message decoding.
//!
//! This crate parses a raw RFC 822/MIME byte stream into a structured view:
//! - top-level headers in an ordered, case-insensitive multi-map
//! - for multipart messages, a tree of body parts, each with its own headers
//! - attribute extraction (boundary, type/subtype, filename) over raw header values
//! - attachment classification over the parsed tree
//!
//! Body bytes are never copied: every [`Part`] is a refcounted slice of the
//! single input buffer, which is released only once the message and every
//! part derived from it are gone. Malformed mail is common in the wild, so
//! nothing short of failing to read the input source is an error; bad MIME
//! degrades to fewer parts instead of aborting the parse.

pub mod attributes;
pub mod classify;
pub mod error;
mod grammar;
pub mod header;
pub mod message;
pub mod part;

// Re-export commonly used types
pub use classify::Classifier;
pub use error::{Error, Result};
pub use header::HeaderTable;
pub use message::{parse, parse_file, Message};
pub use part::Part;

/// Builds the process-wide attribute grammar state.
///
/// Parsing builds it lazily on first use, so calling this is never required;
/// it only front-loads the work. Calling it more than once is a no-op.
pub fn init() {
    grammar::init();
}

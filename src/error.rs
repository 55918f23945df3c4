//! Error types for the mimetree crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for message source acquisition.
///
/// Only failing to obtain the input buffer is an error. Malformed MIME
/// content never produces one: a message with a broken header block or a
/// bad boundary still parses, just with fewer headers or parts.
#[derive(Error, Debug)]
pub enum Error {
    /// The message source could not be read.
    #[error("cannot read message source {path:?}")]
    Source {
        /// Path of the source that failed.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },
}

/// Specialized Result type for mimetree operations.
pub type Result<T> = std::result::Result<T, Error>;

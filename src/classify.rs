//! Attachment classification over a parsed part tree.

use crate::message::Message;
use crate::part::Part;

/// Default inline size limit: 1 MiB.
const DEFAULT_INLINE_LIMIT: usize = 1024 * 1024;

/// Decides which parts of a message count as attachments.
///
/// Multipart parts are never classified themselves; classification recurses
/// into their children. A leaf is an attachment when it exceeds the inline
/// size limit, when a `text/*` or `message/*` part carries an attachment
/// disposition or a filename, or when it declares any other type.
#[derive(Debug, Clone)]
pub struct Classifier {
    inline_limit: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_INLINE_LIMIT)
    }
}

impl Classifier {
    /// A classifier treating leaves larger than `inline_limit` bytes as
    /// attachments regardless of their declared type.
    pub fn new(inline_limit: usize) -> Self {
        Self { inline_limit }
    }

    /// Reports whether any part of the message classifies as an attachment.
    ///
    /// A message without a part tree has no attachments.
    pub fn has_attachment(&self, message: &Message) -> bool {
        message.root().is_some_and(|root| self.is_attachment(root))
    }

    /// Reports whether `part` or any of its descendants classifies as an
    /// attachment.
    pub fn is_attachment(&self, part: &Part) -> bool {
        if part.is_type("multipart", "*") {
            return part.children().iter().any(|child| self.is_attachment(child));
        }
        if part.len() > self.inline_limit {
            return true;
        }
        if part.is_type("text", "*") || part.is_type("message", "*") {
            part.is_disposition("attachment") || part.filename().is_some()
        } else {
            true
        }
    }
}

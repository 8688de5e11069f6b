//! Per-document state held while a document is open
//!
//! The checker only ever looks at the first physical line, so that is all
//! the backend keeps per document, next to the file type resolved at open
//! time (`didChange` does not carry a language id).

use crate::file_types::FileType;

/// State for one open document.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub file_type: FileType,
    /// Text of line 0, without the line terminator.
    pub first_line: String,
}

/// Extract the text of line 0 from a full document body.
///
/// Every document has a line 0; for an empty body it is the empty string.
/// Trailing `\r` from CRLF terminators is stripped.
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

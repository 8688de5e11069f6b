//! Magic comment detection
//!
//! The leaf of the whole system: decide whether line 0 of a document carries
//! the frozen string literal magic comment. The verdict is a pure function
//! of the line text and is recomputed from scratch on every event, never
//! cached.

use tower_lsp::lsp_types::Url;

use crate::file_types::FileType;

/// The magic comment marker. Presence of this substring anywhere on line 0
/// counts as "comment exists", whatever the parameter value after it.
pub const FROZEN_STRING_LITERAL: &str = "# frozen_string_literal:";

/// Outcome of checking a document's first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Line 0 contains the magic comment.
    Present,
    /// Line 0 lacks the magic comment.
    Missing,
}

impl Verdict {
    pub fn is_missing(self) -> bool {
        matches!(self, Verdict::Missing)
    }
}

/// Check line 0 for the magic comment marker.
pub fn evaluate(first_line: &str) -> Verdict {
    if first_line.contains(FROZEN_STRING_LITERAL) {
        Verdict::Present
    } else {
        Verdict::Missing
    }
}

/// Applicability guard: only real Ruby-like files are checked.
///
/// A document qualifies when its language id maps to a recognized
/// [`FileType`] and its URI points at a filesystem-backed file. Untitled
/// buffers (`untitled:` scheme) are excluded unless `include_untitled` is
/// set; other virtual schemes (git, diff views, ...) never qualify.
pub fn is_applicable(uri: &Url, language_id: &str, include_untitled: bool) -> bool {
    if FileType::from_language_id(language_id).is_none() {
        return false;
    }
    match uri.scheme() {
        "file" => true,
        "untitled" => include_untitled,
        _ => false,
    }
}

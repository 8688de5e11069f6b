//! Inlay hints provider: the inline "missing comment" annotation
//!
//! The visual styling (color, background, border) of the original inline
//! decoration is an editor-side concern for inlay hints; only the rendered
//! text travels over the wire.

use tower_lsp::lsp_types::{InlayHint, InlayHintKind, InlayHintLabel, Position};

use crate::annotator::{self, FROZEN_STRING_LITERAL, Verdict};

/// Rendering parameters for the annotation, built once at startup from the
/// configuration and passed to wherever hints are produced.
#[derive(Debug, Clone)]
pub struct DecorationStyle {
    /// After-text shown at the start of line 0.
    pub text: String,
}

impl Default for DecorationStyle {
    fn default() -> Self {
        Self {
            text: "Missing frozen string literal".to_string(),
        }
    }
}

/// Generate the decoration list for a document's first line.
///
/// At most one hint, anchored at (0,0); an empty list when the comment is
/// present so a sink update fully clears a stale annotation.
pub fn create_decorations(first_line: &str, style: &DecorationStyle) -> Vec<InlayHint> {
    match annotator::evaluate(first_line) {
        Verdict::Present => vec![],
        Verdict::Missing => vec![create_missing_hint(style)],
    }
}

fn create_missing_hint(style: &DecorationStyle) -> InlayHint {
    InlayHint {
        position: Position { line: 0, character: 0 },
        label: InlayHintLabel::String(format!(" {}", style.text)),
        kind: Some(InlayHintKind::TYPE),
        text_edits: None,
        tooltip: Some(tower_lsp::lsp_types::InlayHintTooltip::String(format!(
            "Add `{FROZEN_STRING_LITERAL} true` to freeze string literals in this file"
        ))),
        padding_left: Some(true),
        padding_right: None,
        data: None,
    }
}

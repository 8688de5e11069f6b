//! Diagnostics provider for the missing magic comment

use tower_lsp::lsp_types::*;

use crate::annotator::{self, Verdict};

/// Diagnostic code attached to the missing-comment diagnostic.
pub const DIAGNOSTIC_CODE: &str = "missing-frozen-string-literal";

/// Create the diagnostic list for a document's first line.
///
/// The list has at most one element and is meant to fully replace the
/// previous entry in the diagnostics sink: one diagnostic when the comment
/// is missing, an empty list when it is present.
pub fn create_diagnostics(first_line: &str) -> Vec<Diagnostic> {
    match annotator::evaluate(first_line) {
        Verdict::Present => vec![],
        Verdict::Missing => vec![create_missing_comment_diagnostic(first_line)],
    }
}

/// Create the informational diagnostic spanning the whole of line 0.
fn create_missing_comment_diagnostic(first_line: &str) -> Diagnostic {
    Diagnostic {
        range: Range {
            start: Position { line: 0, character: 0 },
            // LSP positions count UTF-16 code units
            end: Position {
                line: 0,
                character: first_line.encode_utf16().count() as u32,
            },
        },
        severity: Some(DiagnosticSeverity::INFORMATION),
        code: Some(NumberOrString::String(DIAGNOSTIC_CODE.to_string())),
        source: Some("frostring".to_string()),
        message: "Do you want to add frozen string literal comment?".to_string(),
        related_information: None,
        tags: None,
        code_description: None,
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_diagnostic_when_comment_present() {
        assert!(create_diagnostics("# frozen_string_literal: true").is_empty());
        assert!(create_diagnostics("# frozen_string_literal: false").is_empty());
    }

    #[test]
    fn test_diagnostic_spans_line_zero() {
        let diagnostics = create_diagnostics("puts 1");
        assert_eq!(diagnostics.len(), 1);

        let diag = &diagnostics[0];
        assert_eq!(diag.range.start, Position { line: 0, character: 0 });
        assert_eq!(diag.range.end, Position { line: 0, character: 6 });
        assert_eq!(diag.severity, Some(DiagnosticSeverity::INFORMATION));
        assert_eq!(diag.source.as_deref(), Some("frostring"));
        assert_eq!(
            diag.code,
            Some(NumberOrString::String(DIAGNOSTIC_CODE.to_string()))
        );
    }

    #[test]
    fn test_empty_line_yields_zero_width_range() {
        let diagnostics = create_diagnostics("");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start, diagnostics[0].range.end);
    }
}

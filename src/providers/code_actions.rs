//! Code actions provider: insert the frozen string literal comment

use std::collections::HashMap;

use tower_lsp::lsp_types::*;

use crate::annotator::{self, FROZEN_STRING_LITERAL, Verdict};

/// Create quick-fix actions for the given range of a document.
///
/// Fixes are only offered when the range starts on line 0 and the comment
/// is actually missing there; anywhere else the result is empty, not an
/// error. Two variants are produced, inserting the comment with `true`
/// (preferred) or `false`.
pub fn create_code_actions(
    first_line: &str,
    uri: &Url,
    range: Range,
) -> Vec<CodeActionOrCommand> {
    if range.start.line != 0 || annotator::evaluate(first_line) == Verdict::Present {
        return vec![];
    }

    vec![
        create_insert_action(first_line, uri, "true", true),
        create_insert_action(first_line, uri, "false", false),
    ]
}

/// Create one "Add # frozen_string_literal: <value>" action.
///
/// The comment line is inserted at (0,0). When line 0 already has content,
/// a blank separator line keeps the comment visually apart from it.
fn create_insert_action(
    first_line: &str,
    uri: &Url,
    value: &str,
    is_preferred: bool,
) -> CodeActionOrCommand {
    let comment = format!("{FROZEN_STRING_LITERAL} {value}");

    let mut new_text = format!("{comment}\n");
    if !first_line.is_empty() {
        new_text.push('\n');
    }

    let edit = TextEdit {
        range: Range {
            start: Position { line: 0, character: 0 },
            end: Position { line: 0, character: 0 },
        },
        new_text,
    };

    let mut changes = HashMap::new();
    changes.insert(uri.clone(), vec![edit]);

    CodeActionOrCommand::CodeAction(CodeAction {
        title: format!("Add {comment}"),
        kind: Some(CodeActionKind::QUICKFIX),
        diagnostics: None,
        edit: Some(WorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        }),
        command: None,
        is_preferred: is_preferred.then_some(true),
        disabled: None,
        data: None,
    })
}

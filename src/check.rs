//! Offline file checking for the `check` subcommand
//!
//! Applies the same line-0 verdict and the same insert rule as the LSP
//! path, but against files on disk instead of editor buffers.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::annotator::{self, FROZEN_STRING_LITERAL, Verdict};
use crate::document::first_line;
use crate::file_types::FileType;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("not a recognized Ruby file: {0}")]
    Unsupported(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of checking one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The magic comment is already there.
    Present,
    /// The magic comment is missing.
    Missing,
    /// The magic comment was missing and has been inserted (`--fix`).
    Fixed,
}

/// Check a single file for the magic comment.
pub fn check_file(path: &Path) -> Result<CheckOutcome, CheckError> {
    let content = read_recognized(path)?;
    match annotator::evaluate(first_line(&content)) {
        Verdict::Present => Ok(CheckOutcome::Present),
        Verdict::Missing => Ok(CheckOutcome::Missing),
    }
}

/// Check a single file and insert the preferred fix when the comment is
/// missing.
pub fn fix_file(path: &Path) -> Result<CheckOutcome, CheckError> {
    let content = read_recognized(path)?;
    match annotator::evaluate(first_line(&content)) {
        Verdict::Present => Ok(CheckOutcome::Present),
        Verdict::Missing => {
            let fixed = insert_comment(&content);
            fs::write(path, fixed).map_err(|source| CheckError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(CheckOutcome::Fixed)
        }
    }
}

fn read_recognized(path: &Path) -> Result<String, CheckError> {
    if FileType::from_path(path).is_none() {
        return Err(CheckError::Unsupported(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| CheckError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Prepend the preferred magic comment to a document body.
///
/// Same rule as the quick-fix edit: the comment line goes at (0,0), with a
/// blank separator line when line 0 already has content.
pub fn insert_comment(content: &str) -> String {
    let mut inserted = format!("{FROZEN_STRING_LITERAL} true\n");
    if !first_line(content).is_empty() {
        inserted.push('\n');
    }
    inserted.push_str(content);
    inserted
}

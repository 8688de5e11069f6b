//! File type detection for the recognized Ruby-like documents
//!
//! The checker only applies to two language ids: plain Ruby sources and
//! Gemfiles. LSP clients report the language id on `didOpen`; the offline
//! `check` command has to infer it from the filesystem path instead.

use std::path::Path;

/// Recognized document kinds.
///
/// Everything else is out of scope and silently skipped by the
/// applicability guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Ruby sources (`ruby` language id: *.rb, *.rake, *.gemspec, Rakefile, ...)
    Ruby,
    /// Bundler manifests (`gemfile` language id)
    Gemfile,
}

impl FileType {
    /// Detect the file type from an LSP language identifier.
    ///
    /// Returns `None` for any language id outside the recognized set.
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id {
            "ruby" => Some(FileType::Ruby),
            "gemfile" => Some(FileType::Gemfile),
            _ => None,
        }
    }

    /// Detect the file type from a filesystem path.
    ///
    /// Mirrors the filename-to-language-id mapping editors use, so the CLI
    /// and the LSP path agree on which files are in scope.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name().and_then(|n| n.to_str())?;
        if file_name == "Gemfile" {
            return Some(FileType::Gemfile);
        }
        if file_name == "Rakefile" {
            return Some(FileType::Ruby);
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("rb") | Some("rake") | Some("gemspec") => Some(FileType::Ruby),
            _ => None,
        }
    }

    /// The LSP language identifier for this file type.
    pub fn language_id(self) -> &'static str {
        match self {
            FileType::Ruby => "ruby",
            FileType::Gemfile => "gemfile",
        }
    }
}

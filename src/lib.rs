//! Frostring LSP - Language Server for frozen string literal comments
//!
//! This crate provides a Language Server Protocol implementation that checks
//! whether Ruby-like files start with a `# frozen_string_literal:` magic
//! comment, reports an informational diagnostic when it is missing, renders
//! an inline annotation, and offers quick-fixes that insert the comment.

pub mod annotator;
pub mod backend;
pub mod check;
pub mod config;
pub mod document;
pub mod file_types;
pub mod providers;
pub mod sinks;
pub mod sync;

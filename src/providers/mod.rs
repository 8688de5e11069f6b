//! LSP feature providers (diagnostics, code actions, inlay hints)

pub mod code_actions;
pub mod diagnostics;
pub mod inlay_hints;

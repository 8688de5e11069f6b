//! Host-owned sinks the synchronizer publishes into
//!
//! The synchronizer never talks to an editor directly; it writes whole
//! replacement values into two keyed stores. The trait seam keeps the
//! event logic host-agnostic:
//!
//! - **DiagnosticsSink**: per-document diagnostic list, settable and
//!   clearable.
//! - **DecorationSink**: per-document inline annotation, settable only —
//!   disposal is the host's job.
//!
//! The in-memory implementations double as the backend's source of truth
//! (the LSP handlers serve `inlayHint` requests straight from
//! [`MemoryDecorations`]) and as the fakes the tests run against.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::{Diagnostic, InlayHint, Url};

/// Keyed store for per-document diagnostics.
///
/// Every `set` is a full overwrite of the previous entry; there is no
/// append or merge operation by design.
pub trait DiagnosticsSink: Send + Sync {
    /// Replace the diagnostics for a document.
    fn set(&self, uri: Url, diagnostics: Vec<Diagnostic>);

    /// Remove the diagnostics entry for a document entirely.
    fn clear(&self, uri: &Url);
}

/// Keyed store for per-document inline annotations.
pub trait DecorationSink: Send + Sync {
    /// Replace the decoration entry for a document.
    fn set(&self, uri: Url, hints: Vec<InlayHint>);
}

impl<T: DiagnosticsSink> DiagnosticsSink for Arc<T> {
    fn set(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        (**self).set(uri, diagnostics)
    }

    fn clear(&self, uri: &Url) {
        (**self).clear(uri)
    }
}

impl<T: DecorationSink> DecorationSink for Arc<T> {
    fn set(&self, uri: Url, hints: Vec<InlayHint>) {
        (**self).set(uri, hints)
    }
}

/// In-memory diagnostics store.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: DashMap<Url, Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current diagnostics for a document, if an entry exists.
    pub fn get(&self, uri: &Url) -> Option<Vec<Diagnostic>> {
        self.entries.get(uri).map(|e| e.value().clone())
    }

    /// Whether any entry exists for the document (possibly empty).
    pub fn contains(&self, uri: &Url) -> bool {
        self.entries.contains_key(uri)
    }
}

impl DiagnosticsSink for MemoryDiagnostics {
    fn set(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        self.entries.insert(uri, diagnostics);
    }

    fn clear(&self, uri: &Url) {
        self.entries.remove(uri);
    }
}

/// In-memory decoration store.
#[derive(Debug, Default)]
pub struct MemoryDecorations {
    entries: DashMap<Url, Vec<InlayHint>>,
}

impl MemoryDecorations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current decoration for a document, if an entry exists.
    pub fn get(&self, uri: &Url) -> Option<Vec<InlayHint>> {
        self.entries.get(uri).map(|e| e.value().clone())
    }

    pub fn contains(&self, uri: &Url) -> bool {
        self.entries.contains_key(uri)
    }

    /// Drop the entry for a disposed document. Called by the host side,
    /// never by the synchronizer.
    pub fn dispose(&self, uri: &Url) {
        self.entries.remove(uri);
    }
}

impl DecorationSink for MemoryDecorations {
    fn set(&self, uri: Url, hints: Vec<InlayHint>) {
        self.entries.insert(uri, hints);
    }
}

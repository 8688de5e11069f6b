//! Document lifecycle synchronization
//!
//! Keeps the diagnostics and decoration sinks in step with document state.
//! Every event recomputes the verdict from line 0 and republishes whole
//! replacement values; nothing is cached or diffed between events, so a
//! superseded recomputation is simply overwritten by the next one.
//!
//! Within one event the decoration sink is updated before the diagnostics
//! sink. On close only the diagnostics entry is removed; decoration
//! disposal belongs to the host.

use dashmap::DashSet;
use tower_lsp::lsp_types::Url;

use crate::annotator;
use crate::config::Config;
use crate::providers::diagnostics::create_diagnostics;
use crate::providers::inlay_hints::{DecorationStyle, create_decorations};
use crate::sinks::{DecorationSink, DiagnosticsSink};

/// The slice of a document the synchronizer looks at.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSnapshot<'a> {
    pub uri: &'a Url,
    pub language_id: &'a str,
    /// Text of line 0, without the line terminator.
    pub first_line: &'a str,
}

/// Pushes per-document verdicts into the host-owned sinks.
///
/// Host-agnostic: the LSP backend hands it memory-backed sinks it serves
/// client requests from, the tests hand it the same fakes directly.
pub struct Synchronizer<D, H> {
    diagnostics: D,
    decorations: H,
    /// Documents currently open in the editor. Decoration updates on a
    /// change event only apply to these.
    visible: DashSet<Url>,
}

impl<D: DiagnosticsSink, H: DecorationSink> Synchronizer<D, H> {
    pub fn new(diagnostics: D, decorations: H) -> Self {
        Self {
            diagnostics,
            decorations,
            visible: DashSet::new(),
        }
    }

    /// Handle a document being opened (or revealed at startup).
    ///
    /// Returns `false` when the document fails the applicability guard, in
    /// which case neither sink was touched.
    pub fn document_opened(
        &self,
        snapshot: &DocumentSnapshot<'_>,
        config: &Config,
        style: &DecorationStyle,
    ) -> bool {
        if !annotator::is_applicable(snapshot.uri, snapshot.language_id, config.include_untitled) {
            return false;
        }

        self.visible.insert(snapshot.uri.clone());
        self.republish(snapshot, config, style, true);
        true
    }

    /// Handle an edit to an open document.
    ///
    /// The diagnostics entry is refreshed unconditionally; the decoration
    /// entry only when the document is currently visible (a no-op
    /// otherwise, not an error).
    pub fn document_changed(
        &self,
        snapshot: &DocumentSnapshot<'_>,
        config: &Config,
        style: &DecorationStyle,
    ) -> bool {
        if !annotator::is_applicable(snapshot.uri, snapshot.language_id, config.include_untitled) {
            return false;
        }

        let update_decorations = self.visible.contains(snapshot.uri);
        self.republish(snapshot, config, style, update_decorations);
        true
    }

    /// Handle a document being closed: the diagnostics entry is removed
    /// entirely. The decoration entry is left for the host to dispose of.
    pub fn document_closed(&self, uri: &Url) {
        self.visible.remove(uri);
        self.diagnostics.clear(uri);
    }

    /// Whether a document is currently tracked as visible.
    pub fn is_visible(&self, uri: &Url) -> bool {
        self.visible.contains(uri)
    }

    fn republish(
        &self,
        snapshot: &DocumentSnapshot<'_>,
        config: &Config,
        style: &DecorationStyle,
        update_decorations: bool,
    ) {
        // Decoration before diagnostic, always.
        if update_decorations && config.decorations.enabled {
            self.decorations.set(
                snapshot.uri.clone(),
                create_decorations(snapshot.first_line, style),
            );
        }
        if config.diagnostics.enabled {
            self.diagnostics
                .set(snapshot.uri.clone(), create_diagnostics(snapshot.first_line));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::sinks::{MemoryDecorations, MemoryDiagnostics};
    use tower_lsp::lsp_types::{Diagnostic, InlayHint};

    fn uri(name: &str) -> Url {
        Url::parse(&format!("file:///test/{name}")).unwrap()
    }

    fn sync() -> Synchronizer<Arc<MemoryDiagnostics>, Arc<MemoryDecorations>> {
        Synchronizer::new(
            Arc::new(MemoryDiagnostics::new()),
            Arc::new(MemoryDecorations::new()),
        )
    }

    fn open<'a>(
        sync: &Synchronizer<Arc<MemoryDiagnostics>, Arc<MemoryDecorations>>,
        snapshot: &DocumentSnapshot<'a>,
    ) -> bool {
        sync.document_opened(snapshot, &Config::default(), &DecorationStyle::default())
    }

    #[test]
    fn test_open_missing_comment_populates_both_sinks() {
        let sync = sync();
        let uri = uri("app.rb");
        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "puts 1",
        };

        assert!(open(&sync, &snapshot));
        assert_eq!(sync.diagnostics.get(&uri).unwrap().len(), 1);
        assert_eq!(sync.decorations.get(&uri).unwrap().len(), 1);
    }

    #[test]
    fn test_open_with_comment_publishes_empty_entries() {
        let sync = sync();
        let uri = uri("app.rb");
        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "# frozen_string_literal: true",
        };

        assert!(open(&sync, &snapshot));
        // an entry exists but holds nothing, overwriting any stale state
        assert_eq!(sync.diagnostics.get(&uri).unwrap().len(), 0);
        assert_eq!(sync.decorations.get(&uri).unwrap().len(), 0);
    }

    #[test]
    fn test_inapplicable_document_touches_nothing() {
        let sync = sync();
        let uri = uri("main.py");
        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "python",
            first_line: "print(1)",
        };

        assert!(!open(&sync, &snapshot));
        assert!(!sync.diagnostics.contains(&uri));
        assert!(!sync.decorations.contains(&uri));
    }

    #[test]
    fn test_close_removes_diagnostics_entry_only() {
        let sync = sync();
        let uri = uri("app.rb");
        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "puts 1",
        };

        open(&sync, &snapshot);
        sync.document_closed(&uri);

        assert!(!sync.diagnostics.contains(&uri));
        // decorations are disposed by the host, not the synchronizer
        assert!(sync.decorations.contains(&uri));
        assert!(!sync.is_visible(&uri));
    }

    #[test]
    fn test_close_clears_regardless_of_verdict() {
        let sync = sync();
        let uri = uri("app.rb");
        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "# frozen_string_literal: true",
        };

        open(&sync, &snapshot);
        sync.document_closed(&uri);
        assert!(!sync.diagnostics.contains(&uri));
    }

    #[test]
    fn test_change_on_unopened_document_skips_decorations() {
        let sync = sync();
        let uri = uri("app.rb");
        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "puts 1",
        };

        // no preceding open event
        assert!(sync.document_changed(
            &snapshot,
            &Config::default(),
            &DecorationStyle::default()
        ));
        assert!(sync.diagnostics.contains(&uri));
        assert!(!sync.decorations.contains(&uri));
    }

    #[test]
    fn test_change_recomputes_from_scratch() {
        let sync = sync();
        let uri = uri("app.rb");
        let config = Config::default();
        let style = DecorationStyle::default();

        let missing = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "puts 1",
        };
        sync.document_opened(&missing, &config, &style);
        assert_eq!(sync.diagnostics.get(&uri).unwrap().len(), 1);

        let fixed = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "# frozen_string_literal: true",
        };
        sync.document_changed(&fixed, &config, &style);
        assert_eq!(sync.diagnostics.get(&uri).unwrap().len(), 0);
        assert_eq!(sync.decorations.get(&uri).unwrap().len(), 0);
    }

    #[test]
    fn test_disabled_diagnostics_leave_sink_untouched() {
        let sync = sync();
        let uri = uri("app.rb");
        let config = Config {
            diagnostics: crate::config::DiagnosticsConfig { enabled: false },
            ..Default::default()
        };

        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "puts 1",
        };
        sync.document_opened(&snapshot, &config, &DecorationStyle::default());

        assert!(!sync.diagnostics.contains(&uri));
        assert!(sync.decorations.contains(&uri));
    }

    #[test]
    fn test_disabled_decorations_leave_sink_untouched() {
        let sync = sync();
        let uri = uri("app.rb");
        let config = Config {
            decorations: crate::config::DecorationsConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "puts 1",
        };
        sync.document_opened(&snapshot, &config, &DecorationStyle::default());

        assert!(sync.diagnostics.contains(&uri));
        assert!(!sync.decorations.contains(&uri));
    }

    /// Records the order sink writes happen in across both sinks.
    #[derive(Clone, Default)]
    struct EventRecorder {
        events: Arc<Mutex<Vec<&'static str>>>,
    }

    impl DiagnosticsSink for EventRecorder {
        fn set(&self, _uri: Url, _diagnostics: Vec<Diagnostic>) {
            self.events.lock().unwrap().push("diagnostics.set");
        }

        fn clear(&self, _uri: &Url) {
            self.events.lock().unwrap().push("diagnostics.clear");
        }
    }

    impl DecorationSink for EventRecorder {
        fn set(&self, _uri: Url, _hints: Vec<InlayHint>) {
            self.events.lock().unwrap().push("decorations.set");
        }
    }

    #[test]
    fn test_decoration_update_precedes_diagnostic_update() {
        let recorder = EventRecorder::default();
        let sync = Synchronizer::new(recorder.clone(), recorder.clone());
        let uri = uri("app.rb");
        let snapshot = DocumentSnapshot {
            uri: &uri,
            language_id: "ruby",
            first_line: "puts 1",
        };

        sync.document_opened(&snapshot, &Config::default(), &DecorationStyle::default());
        sync.document_changed(&snapshot, &Config::default(), &DecorationStyle::default());

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec![
                "decorations.set",
                "diagnostics.set",
                "decorations.set",
                "diagnostics.set"
            ]
        );
    }
}

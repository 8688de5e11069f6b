//! LSP backend: wires document lifecycle notifications to the synchronizer
//! and serves feature requests from the sink state.

use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::Config;
use crate::document::{DocumentState, first_line};
use crate::file_types::FileType;
use crate::providers::code_actions::create_code_actions;
use crate::providers::inlay_hints::DecorationStyle;
use crate::sinks::{MemoryDecorations, MemoryDiagnostics};
use crate::sync::{DocumentSnapshot, Synchronizer};

pub struct FrostringBackend {
    client: Client,
    /// Configuration
    config: RwLock<Config>,
    /// Decoration rendering parameters, built from the configuration at
    /// initialize time
    style: RwLock<DecorationStyle>,
    /// State for applicable open documents
    documents: DashMap<Url, DocumentState>,
    /// Current diagnostics per document; mirrored to the client via
    /// `publishDiagnostics`
    diagnostics: Arc<MemoryDiagnostics>,
    /// Current decoration per document; served from the `inlayHint` handler
    decorations: Arc<MemoryDecorations>,
    /// Event handling for the two sinks above
    sync: Synchronizer<Arc<MemoryDiagnostics>, Arc<MemoryDecorations>>,
}

impl FrostringBackend {
    pub fn new(client: Client) -> Self {
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let decorations = Arc::new(MemoryDecorations::new());

        Self {
            client,
            config: RwLock::new(Config::default()),
            style: RwLock::new(DecorationStyle::default()),
            documents: DashMap::new(),
            sync: Synchronizer::new(Arc::clone(&diagnostics), Arc::clone(&decorations)),
            diagnostics,
            decorations,
        }
    }

    fn config(&self) -> Config {
        self.config.read().map(|c| c.clone()).unwrap_or_default()
    }

    fn style(&self) -> DecorationStyle {
        self.style.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Run the synchronizer for an open/change event and mirror the sink
    /// state to the client.
    async fn process_document(&self, uri: &Url, language_id: &str, text: &str, opened: bool) {
        let config = self.config();
        let style = self.style();
        let line = first_line(text);

        let snapshot = DocumentSnapshot {
            uri,
            language_id,
            first_line: line,
        };

        if let Some(mut state) = self.documents.get_mut(uri) {
            state.first_line = line.to_string();
        }

        let processed = if opened {
            self.sync.document_opened(&snapshot, &config, &style)
        } else {
            self.sync.document_changed(&snapshot, &config, &style)
        };

        if !processed {
            tracing::debug!("Skipping {} ({})", uri, language_id);
            return;
        }

        self.publish(uri).await;
    }

    /// Push the current sink state for one document out to the client.
    async fn publish(&self, uri: &Url) {
        if let Some(diagnostics) = self.diagnostics.get(uri) {
            self.client
                .publish_diagnostics(uri.clone(), diagnostics, None)
                .await;
        }

        // Announce decoration changes; the client pulls the hints back.
        self.client
            .send_request::<request::InlayHintRefreshRequest>(())
            .await
            .ok();
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for FrostringBackend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let config = Config::from_init_options(params.initialization_options);
        tracing::info!("Configuration: {:?}", config);

        if let Ok(mut style) = self.style.write() {
            *style = DecorationStyle {
                text: config.decorations.text.clone(),
            };
        }
        if let Ok(mut cfg) = self.config.write() {
            *cfg = config;
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "frostring-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                inlay_hint_provider: Some(OneOf::Left(true)),
                code_action_provider: Some(CodeActionProviderCapability::Options(
                    CodeActionOptions {
                        code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Frostring LSP initialized")
            .await;
        tracing::info!("Frostring LSP initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Frostring LSP shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let language_id = params.text_document.language_id;
        let text = params.text_document.text;

        tracing::debug!("Document opened: {}", uri);

        if let Some(file_type) = FileType::from_language_id(&language_id) {
            self.documents.insert(
                uri.clone(),
                DocumentState {
                    file_type,
                    first_line: first_line(&text).to_string(),
                },
            );
        }

        self.process_document(&uri, &language_id, &text, true).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        // didChange carries no language id; only documents that passed the
        // open-time detection are tracked.
        let Some(file_type) = self.documents.get(&uri).map(|d| d.file_type) else {
            return;
        };

        // With FULL sync, we get the entire document content
        if let Some(change) = params.content_changes.into_iter().next() {
            tracing::debug!("Document changed: {}", uri);
            self.process_document(&uri, file_type.language_id(), &change.text, false)
                .await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;

        let Some(file_type) = self.documents.get(&uri).map(|d| d.file_type) else {
            return;
        };

        // Re-check on save if we have the text
        if let Some(text) = params.text {
            tracing::debug!("Document saved: {}", uri);
            self.process_document(&uri, file_type.language_id(), &text, false)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document closed: {}", uri);

        self.sync.document_closed(&uri);
        self.documents.remove(&uri);
        // Host-side disposal of the decoration entry
        self.decorations.dispose(&uri);

        // Clear diagnostics for this document
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        let uri = &params.text_document.uri;

        if !self.config().decorations.enabled {
            return Ok(Some(vec![]));
        }

        // Hints live on line 0 only; skip when it is out of the requested range.
        if params.range.start.line > 0 {
            return Ok(Some(vec![]));
        }

        let hints = self.decorations.get(uri).unwrap_or_default();
        tracing::debug!("Returning {} inlay hints for {}", hints.len(), uri);
        Ok(Some(hints))
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = &params.text_document.uri;

        let Some(doc) = self.documents.get(uri) else {
            return Ok(Some(vec![]));
        };

        let actions = create_code_actions(&doc.first_line, uri, params.range);
        Ok(Some(actions))
    }
}

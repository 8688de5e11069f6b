//! Configuration management for frostring-lsp

use serde::Deserialize;

/// Default after-text rendered next to a missing comment.
const DEFAULT_DECORATION_TEXT: &str = "Missing frozen string literal";

/// LSP configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Diagnostics configuration
    pub diagnostics: DiagnosticsConfig,
    /// Decoration (inlay hint) configuration
    pub decorations: DecorationsConfig,
    /// Also check untitled (not yet saved) buffers
    pub include_untitled: bool,
}

/// Diagnostics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Enable diagnostics
    pub enabled: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Decoration configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecorationsConfig {
    /// Enable the inline annotation
    pub enabled: bool,
    /// After-text rendered at the end of line 0
    pub text: String,
}

impl Default for DecorationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: DEFAULT_DECORATION_TEXT.to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from initialization options
    pub fn from_init_options(options: Option<serde_json::Value>) -> Self {
        match options {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Self::default(),
        }
    }
}

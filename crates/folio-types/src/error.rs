//! Error types for folio.

use std::io;

/// Errors produced by the folio crates.
///
/// None of these ever reach the visitor. Page features log them and skip
/// their own initialization; everything else keeps running.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("config error: {0}")]
    Config(String),

    #[error("selector error: {0}")]
    Selector(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;

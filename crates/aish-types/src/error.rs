//! Error types for aish.

use std::io;

/// Errors produced by the aish interpreter and its capabilities.
#[derive(Debug, thiserror::Error)]
pub enum AishError {
    #[error("file store error: {0}")]
    Vfs(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("program error: {0}")]
    Program(String),

    #[error("chat error: {0}")]
    Chat(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AishError>;

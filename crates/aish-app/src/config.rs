//! Host configuration, loaded from an optional TOML file.

use anyhow::Context;
use serde::Deserialize;

/// Settings the host applies at startup.
///
/// Every field has a default; a missing config file means a default
/// session, a malformed one is a startup error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Prompt suffix printed after the working directory.
    pub prompt: String,
    /// Theme handed to the interpreter at startup.
    pub theme: String,
    /// Maximum number of history entries to retain.
    pub history_limit: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "$".to_string(),
            theme: "dark".to_string(),
            history_limit: 50,
        }
    }
}

impl ShellConfig {
    /// Load from `$AISH_CONFIG` (or `aish.toml` in the working directory).
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("AISH_CONFIG").unwrap_or_else(|_| "aish.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                toml::from_str(&text).with_context(|| format!("invalid config file: {path}"))
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("cannot read config file: {path}")),
        }
    }
}

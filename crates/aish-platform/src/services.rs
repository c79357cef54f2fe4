//! Program-execution and AI chat capability traits.

use aish_types::error::Result;
use async_trait::async_trait;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Program execution
// ---------------------------------------------------------------------------

/// Result of handing a program to the execution engine.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Text the program produced.
    pub output: String,
    /// Whether the program completed without error.
    pub success: bool,
    /// Optional engine-supplied explanation of what the program did.
    pub explanation: Option<String>,
}

/// Abstraction over the program-execution engine.
#[async_trait]
pub trait ProgramRunner: Send + Sync {
    /// Execute `code` and report the outcome.
    async fn run(&self, code: &str) -> Result<RunOutcome>;
}

// ---------------------------------------------------------------------------
// AI chat
// ---------------------------------------------------------------------------

/// Session context sent along with every chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatContext {
    /// The session's current working directory.
    pub current_directory: String,
    /// Where the message originated; always `"terminal"` for this core.
    pub context: String,
}

impl ChatContext {
    /// Context for a message submitted at the terminal.
    pub fn terminal(current_directory: &str) -> Self {
        Self {
            current_directory: current_directory.to_string(),
            context: "terminal".to_string(),
        }
    }
}

/// Abstraction over the AI chat backend.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `message` with `ctx` and return the backend's textual reply.
    async fn chat(&self, message: &str, ctx: &ChatContext) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_context_fields() {
        let ctx = ChatContext::terminal("/home/user");
        assert_eq!(ctx.current_directory, "/home/user");
        assert_eq!(ctx.context, "terminal");
    }

    #[test]
    fn chat_context_serializes() {
        let ctx = ChatContext::terminal("/tmp");
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("\"current_directory\":\"/tmp\""));
        assert!(json.contains("\"context\":\"terminal\""));
    }
}

//! Natural-language executor: forwards free-form text to the AI backend.

use std::sync::Arc;

use aish_platform::{ChatClient, ChatContext};
use log::warn;

use crate::result::{CommandResult, timed};

/// Executor for natural-language requests.
pub struct NaturalExecutor {
    chat: Arc<dyn ChatClient>,
}

impl NaturalExecutor {
    pub fn new(chat: Arc<dyn ChatClient>) -> Self {
        Self { chat }
    }

    /// Forward `input` to the chat capability with the session's working
    /// directory as context. The reply becomes the result's output.
    pub async fn execute(&self, input: &str, current_directory: &str) -> CommandResult {
        timed(async {
            let ctx = ChatContext::terminal(current_directory);
            match self.chat.chat(input, &ctx).await {
                Ok(reply) => CommandResult::success(reply),
                Err(e) => {
                    warn!("chat capability failed: {e}");
                    let message = e.to_string();
                    if message.is_empty() {
                        CommandResult::failure("AI request failed")
                    } else {
                        CommandResult::failure(message)
                    }
                },
            }
        })
        .await
    }
}

//! Offline stand-ins for the real engines.
//!
//! Hosts that run without a program-execution engine or an AI backend (the
//! demo CLI, unit tests) plug these in. Both are deterministic.

use aish_types::error::Result;
use async_trait::async_trait;

use crate::{ChatClient, ChatContext, ProgramRunner, RunOutcome};

/// Program runner that acknowledges code without executing it.
#[derive(Debug, Default)]
pub struct StubRunner;

impl StubRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgramRunner for StubRunner {
    async fn run(&self, code: &str) -> Result<RunOutcome> {
        log::debug!("stub runner received {} bytes of code", code.len());
        Ok(RunOutcome {
            output: format!("Accepted {} bytes of program text", code.len()),
            success: true,
            explanation: Some("No execution engine is attached to this session".to_string()),
        })
    }
}

/// Chat client that answers locally with a fixed-format reply.
#[derive(Debug, Default)]
pub struct CannedChat;

impl CannedChat {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatClient for CannedChat {
    async fn chat(&self, message: &str, ctx: &ChatContext) -> Result<String> {
        log::debug!("canned chat answering from {}", ctx.current_directory);
        Ok(format!(
            "No AI backend is connected to this session.\n\
             Your request was: {message}\n\
             (asked from {})",
            ctx.current_directory
        ))
    }
}

//! Top-level dispatch: parse, classify, execute, one uniform result.

use std::sync::Arc;

use aish_platform::{ChatClient, ProgramRunner};
use aish_vfs::FileStore;
use log::debug;

use crate::classify::{CommandKind, classify};
use crate::local::LocalHandler;
use crate::natural::NaturalExecutor;
use crate::parser;
use crate::result::CommandResult;
use crate::session::SessionEnv;
use crate::system::{SystemCommand, SystemExecutor};

/// The interpreter facade the host talks to.
///
/// One instance per session. Holds the only mutable state the core owns:
/// the working directory (inside the system executor) and the remembered
/// theme (inside the local handler).
pub struct Interpreter {
    local: LocalHandler,
    system: SystemExecutor,
    natural: NaturalExecutor,
}

impl Interpreter {
    pub fn new(
        files: Arc<dyn FileStore>,
        programs: Arc<dyn ProgramRunner>,
        chat: Arc<dyn ChatClient>,
        initial_theme: &str,
    ) -> Self {
        Self {
            local: LocalHandler::new(initial_theme),
            system: SystemExecutor::new(files, programs),
            natural: NaturalExecutor::new(chat),
        }
    }

    /// The session's current working directory.
    pub fn cwd(&self) -> &str {
        self.system.cwd()
    }

    /// The theme last applied in this session.
    pub fn current_theme(&self) -> &str {
        self.local.current_theme()
    }

    /// Execute one submitted line.
    ///
    /// Every path resolves to a [`CommandResult`]; nothing panics and no
    /// error escapes. System-classified lines go through a two-stage
    /// resolution: names the system executor recognizes run there, the rest
    /// fall through to the natural-language executor with the original raw
    /// input.
    pub async fn execute(&mut self, input: &str, session: &mut SessionEnv<'_>) -> CommandResult {
        let parsed = parser::parse(input);
        let kind = classify(input);
        debug!("dispatch {kind:?}: {:?}", parsed.command);

        match kind {
            CommandKind::Client => self.local.execute(&parsed, session).await,
            CommandKind::Natural => {
                self.natural
                    .execute(&parsed.raw_input, self.system.cwd())
                    .await
            },
            CommandKind::System => match SystemCommand::resolve(&parsed.command) {
                Some(command) => self.system.execute(command, &parsed).await,
                None => {
                    debug!("no system command {:?}, falling through to chat", parsed.command);
                    self.natural
                        .execute(&parsed.raw_input, self.system.cwd())
                        .await
                },
            },
        }
    }
}

//! Command interpreter core for aish.
//!
//! One submitted line flows through the parser, the classifier, and one of
//! three executors: local control commands, system commands against the
//! virtual file store, or natural-language requests to the AI backend.
//! Whatever ran, the host gets back a single [`CommandResult`].

mod classify;
mod interpreter;
mod local;
mod natural;
mod parser;
mod result;
mod session;
mod system;

/// The three execution strategies a line can classify into.
pub use classify::{CommandKind, classify};
/// The interpreter facade the host talks to.
pub use interpreter::Interpreter;
/// Handler for local control commands.
pub use local::LocalHandler;
/// Executor for natural-language requests.
pub use natural::NaturalExecutor;
/// Structured form of one submitted line.
pub use parser::{FlagValue, ParsedCommand, parse};
/// Uniform result of every execution path.
pub use result::CommandResult;
/// Host-supplied session environment for local commands.
pub use session::{HistorySource, Screen, SessionEnv, ThemeSink};
/// Executor for system commands, owner of the working directory.
pub use system::{SystemCommand, SystemExecutor};

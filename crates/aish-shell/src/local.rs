//! Locally-handled control commands.
//!
//! These commands never call an external capability; they read and mutate
//! session state only. Dispatch is over a closed enum so that adding a
//! reserved name forces every match in this file to be revisited.

use log::debug;

use crate::parser::{FlagValue, ParsedCommand};
use crate::result::{CommandResult, timed};
use crate::session::SessionEnv;

/// Closed set of recognized local commands.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LocalCommand {
    Clear,
    Help,
    History,
    About,
    Theme,
    Settings,
    Exit,
    Unknown(String),
}

impl LocalCommand {
    fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "clear" | "cls" => Self::Clear,
            "help" => Self::Help,
            "history" => Self::History,
            "about" | "version" => Self::About,
            "theme" => Self::Theme,
            "settings" => Self::Settings,
            "exit" => Self::Exit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Themes the handler offers.
const THEMES: &[&str] = &["dark", "light", "matrix", "amber"];

const HELP_TEXT: &str = "\
aish command reference

  Session
    help [topic]      this text, or help on a topic (files, programs, ai, themes)
    history [-n N]    recent commands
    clear, cls        clear the screen
    theme [name]      list or switch themes
    settings          current session settings
    about, version    version information
    exit              how to leave

  Files
    ls [path]         list a directory        cat <file>   show a file
    cd [path]         change directory        pwd          where am I
    mkdir <dir>       create a directory      rm <file>    delete a file
    cp <src> <dst>    copy                    mv <src> <dst>  move
    echo [text]       print text

  Programs
    run <code>        hand code to the execution engine
    load <file>       load a program          save <file>  save a program
    list              show the loaded program

  Ask the AI
    Anything else that reads like a question or request is sent to the
    AI backend, e.g. \"what files are here?\" or \"create a sorting program\".";

fn topic_help(topic: &str) -> Option<&'static str> {
    match topic.to_lowercase().as_str() {
        "files" => Some(
            "File commands operate on the virtual file store.\n\
             Paths starting with / are absolute; everything else is relative\n\
             to the current directory (see pwd).",
        ),
        "programs" => Some(
            "run hands code straight to the execution engine; load and save\n\
             move program text between the store and the session.",
        ),
        "ai" => Some(
            "Questions and requests are forwarded to the AI backend together\n\
             with your current directory. Reserved command names are never\n\
             sent to the AI.",
        ),
        "themes" => Some("Use 'theme' to list themes and 'theme <name>' to switch."),
        _ => None,
    }
}

/// Handler for local commands.
///
/// Owns the remembered theme for the session; one instance is constructed
/// per interpreter and lives as long as it does.
pub struct LocalHandler {
    current_theme: String,
}

impl LocalHandler {
    pub fn new(initial_theme: &str) -> Self {
        Self {
            current_theme: initial_theme.to_string(),
        }
    }

    /// The theme last applied in this session.
    pub fn current_theme(&self) -> &str {
        &self.current_theme
    }

    /// Execute one local command. Always resolves to a result; unknown
    /// names fail with exit code 1.
    pub async fn execute(
        &mut self,
        parsed: &ParsedCommand,
        session: &mut SessionEnv<'_>,
    ) -> CommandResult {
        timed(async {
            let command = LocalCommand::from_name(&parsed.command);
            debug!("local command: {command:?}");
            match command {
                LocalCommand::Clear => {
                    session.screen.clear();
                    CommandResult::success("")
                },
                LocalCommand::Help => self.execute_help(parsed),
                LocalCommand::History => self.execute_history(parsed, session),
                LocalCommand::About => self.execute_about(),
                LocalCommand::Theme => self.execute_theme(parsed, session),
                LocalCommand::Settings => self.execute_settings(),
                LocalCommand::Exit => CommandResult::success(
                    "The session is owned by the host shell. Close the window or press Ctrl+D to leave.",
                ),
                LocalCommand::Unknown(name) => {
                    CommandResult::failure(format!("Unknown client command: {name}"))
                },
            }
        })
        .await
    }

    fn execute_help(&self, parsed: &ParsedCommand) -> CommandResult {
        match parsed.args.first() {
            None => CommandResult::success(HELP_TEXT),
            Some(topic) => match topic_help(topic) {
                Some(text) => CommandResult::success(text),
                // An unknown topic is not an error.
                None => CommandResult::success(format!("No help available for: {topic}")),
            },
        }
    }

    fn execute_history(
        &self,
        parsed: &ParsedCommand,
        session: &SessionEnv<'_>,
    ) -> CommandResult {
        let entries = session.history.entries();
        if entries.is_empty() {
            return CommandResult::success("No command history");
        }
        let total = entries.len();
        // -n with a non-numeric or missing value falls back to everything.
        let count = parsed
            .flag("n")
            .and_then(FlagValue::value)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(total)
            .min(total);
        let lines: Vec<String> = entries
            .iter()
            .enumerate()
            .skip(total - count)
            .map(|(i, entry)| format!("{}  {entry}", i + 1))
            .collect();
        CommandResult::success(lines.join("\n"))
    }

    fn execute_about(&self) -> CommandResult {
        CommandResult::success(format!(
            "aish v{}\n\
             An AI-assisted command interpreter.\n\
             Commands are routed to the session, the virtual file store, or\n\
             the AI backend depending on what you type. Try 'help'.",
            env!("CARGO_PKG_VERSION")
        ))
    }

    fn execute_theme(
        &mut self,
        parsed: &ParsedCommand,
        session: &mut SessionEnv<'_>,
    ) -> CommandResult {
        match parsed.args.first() {
            Some(name) => match session.theme.as_deref_mut() {
                Some(sink) => {
                    sink.apply(name);
                    self.current_theme = name.to_string();
                    CommandResult::success(format!("Theme changed to: {name}"))
                },
                // Still exit 0: the command is understood, the host just
                // has nowhere to apply it.
                None => CommandResult::success(
                    "Theme switching is not available in this session",
                ),
            },
            None => {
                let mut lines = vec!["Available themes:".to_string()];
                for theme in THEMES {
                    lines.push(format!("  {theme}"));
                }
                lines.push(format!("Current theme: {}", self.current_theme));
                CommandResult::success(lines.join("\n"))
            },
        }
    }

    fn execute_settings(&self) -> CommandResult {
        CommandResult::success(format!(
            "Session settings:\n\
             \x20 theme    {}\n\
             \x20 prompt   $\n\
             \x20 history  50 entries\n\
             \x20 ai       enabled",
            self.current_theme
        ))
    }
}

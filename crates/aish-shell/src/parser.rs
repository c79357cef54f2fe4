//! Line parser: raw input to structured command.
//!
//! One submitted line becomes one [`ParsedCommand`]. The parser is a pure
//! total function; there is no input it rejects.

use std::collections::BTreeMap;

/// Value of a parsed flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Flag present with no value (`--all`, bare `-l`).
    Set,
    /// Flag with an explicit value (`--name=x`, `-n 5`).
    Value(String),
}

impl FlagValue {
    /// The flag's value when one was given.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Set => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// Structured form of one submitted line.
///
/// Created fresh per submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// First whitespace-delimited token; empty string for blank input.
    /// Kept in original case; consumers lowercase when matching names.
    pub command: String,
    /// Positional tokens in order of appearance.
    pub args: Vec<String>,
    /// Parsed flags, keyed by name without dashes. Last occurrence wins.
    pub flags: BTreeMap<String, FlagValue>,
    /// The trimmed original line with whitespace runs collapsed to single
    /// spaces (a side effect of re-joining the tokens).
    pub raw_input: String,
}

impl ParsedCommand {
    /// Look up a flag by name.
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }
}

/// Parse one input line.
///
/// The first token is always the command name, even when it looks like a
/// flag (`--help` becomes the command `--help`); only tokens after the first
/// are scanned for flag syntax. A single-dash flag consumes the following
/// token as its value when that token does not itself start with a dash.
pub fn parse(input: &str) -> ParsedCommand {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let raw_input = tokens.join(" ");

    let command = tokens.first().map(|t| t.to_string()).unwrap_or_default();
    let mut args = Vec::new();
    let mut flags = BTreeMap::new();

    let mut i = 1;
    while i < tokens.len() {
        let token = tokens[i];
        if let Some(rest) = token.strip_prefix("--") {
            match rest.split_once('=') {
                Some((key, value)) => {
                    flags.insert(key.to_string(), FlagValue::Value(value.to_string()));
                },
                None => {
                    flags.insert(rest.to_string(), FlagValue::Set);
                },
            }
        } else if let Some(name) = token.strip_prefix('-') {
            match tokens.get(i + 1) {
                Some(next) if !next.starts_with('-') => {
                    flags.insert(name.to_string(), FlagValue::Value((*next).to_string()));
                    i += 1;
                },
                _ => {
                    flags.insert(name.to_string(), FlagValue::Set);
                },
            }
        } else {
            args.push(token.to_string());
        }
        i += 1;
    }

    ParsedCommand {
        command,
        args,
        flags,
        raw_input,
    }
}

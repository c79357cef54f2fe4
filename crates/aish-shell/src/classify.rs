//! Command classifier: decides which executor handles a submitted line.

use crate::parser;

/// The three execution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Handled entirely inside the interpreter's own session state.
    Client,
    /// Needs the virtual file store or the program runner.
    System,
    /// Free-form text forwarded to the AI chat capability.
    Natural,
}

/// Reserved local command names. A reserved name always reads as a control
/// command, even when the line would also match a natural-language pattern.
const RESERVED: &[&str] = &[
    "clear", "cls", "help", "history", "about", "version", "theme", "settings", "exit",
];

/// Leading words that read as a question.
const QUESTION_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "can", "could", "would", "should", "is", "are",
    "do", "does",
];

/// Conversational openers, matched as prefixes of the whole line.
const OPENERS: &[&str] = &[
    "show me", "tell me", "explain", "find", "search for", "list all", "get me",
];

/// Leading verbs that ask for something to be produced.
const CREATION_VERBS: &[&str] = &["create", "make", "generate", "write", "build"];

/// Classify one input line.
///
/// Total on all strings; empty input classifies as [`CommandKind::System`]
/// (no name matches the reserved set and no pattern matches an empty line).
pub fn classify(input: &str) -> CommandKind {
    let parsed = parser::parse(input);
    let name = parsed.command.to_lowercase();
    if RESERVED.contains(&name.as_str()) {
        return CommandKind::Client;
    }

    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();
    let first_word = lower.split_whitespace().next().unwrap_or("");

    if QUESTION_WORDS.contains(&first_word)
        || trimmed.ends_with('?')
        || OPENERS.iter().any(|opener| lower.starts_with(opener))
        || CREATION_VERBS.contains(&first_word)
    {
        return CommandKind::Natural;
    }

    CommandKind::System
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_are_client() {
        for name in ["help", "clear", "cls", "history", "about", "version", "theme", "settings",
            "exit"]
        {
            assert_eq!(classify(name), CommandKind::Client, "name: {name}");
        }
    }

    #[test]
    fn reserved_name_with_args_is_client() {
        assert_eq!(classify("help commands"), CommandKind::Client);
        assert_eq!(classify("history -n 5"), CommandKind::Client);
    }

    #[test]
    fn reserved_names_are_case_insensitive() {
        assert_eq!(classify("HELP"), CommandKind::Client);
        assert_eq!(classify("Clear"), CommandKind::Client);
    }

    #[test]
    fn question_words_are_natural() {
        assert_eq!(classify("what files are here?"), CommandKind::Natural);
        assert_eq!(classify("how does this work"), CommandKind::Natural);
        assert_eq!(classify("can you sort these"), CommandKind::Natural);
    }

    #[test]
    fn trailing_question_mark_is_natural() {
        assert_eq!(classify("sort this list?"), CommandKind::Natural);
    }

    #[test]
    fn openers_are_natural() {
        assert_eq!(classify("show me the files"), CommandKind::Natural);
        assert_eq!(classify("tell me about rust"), CommandKind::Natural);
        assert_eq!(classify("search for readme"), CommandKind::Natural);
        assert_eq!(classify("list all programs"), CommandKind::Natural);
    }

    #[test]
    fn creation_verbs_are_natural() {
        assert_eq!(classify("create a sorting program"), CommandKind::Natural);
        assert_eq!(classify("write a haiku"), CommandKind::Natural);
        assert_eq!(classify("generate test data"), CommandKind::Natural);
    }

    #[test]
    fn plain_commands_are_system() {
        assert_eq!(classify("ls -la"), CommandKind::System);
        assert_eq!(classify("cat readme.txt"), CommandKind::System);
        assert_eq!(classify("foobar"), CommandKind::System);
    }

    #[test]
    fn empty_input_is_system() {
        assert_eq!(classify(""), CommandKind::System);
        assert_eq!(classify("   "), CommandKind::System);
    }

    #[test]
    fn reserved_beats_natural_patterns() {
        // "clear" is also an imperative verb; the reserved set wins.
        assert_eq!(classify("clear the screen?"), CommandKind::Client);
    }

    #[test]
    fn bare_list_is_system_but_list_all_is_natural() {
        assert_eq!(classify("list"), CommandKind::System);
        assert_eq!(classify("list all files"), CommandKind::Natural);
    }

    #[test]
    fn question_word_casing_is_ignored() {
        assert_eq!(classify("What is this"), CommandKind::Natural);
    }
}

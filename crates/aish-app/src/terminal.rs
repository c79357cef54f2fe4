//! Terminal-side session services: the screen and the theme sink.

use aish_shell::{Screen, ThemeSink};

/// Screen backed by the controlling terminal.
pub struct CliScreen;

impl Screen for CliScreen {
    fn clear(&mut self) {
        // ANSI clear + cursor home.
        print!("\x1b[2J\x1b[H");
    }
}

/// Theme state for the session.
///
/// A real UI would restyle itself here; the CLI just remembers the name so
/// `settings` and `theme` report something truthful.
pub struct ThemeState {
    name: String,
}

impl ThemeState {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl ThemeSink for ThemeState {
    fn apply(&mut self, name: &str) {
        log::info!("theme switched: {} -> {name}", self.name);
        self.name = name.to_string();
    }
}

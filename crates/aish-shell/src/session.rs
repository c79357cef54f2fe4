//! Host-supplied session environment for local commands.
//!
//! Local commands only touch interpreter/session state, but some of that
//! state (the scrollback, the command history, the active theme) is owned by
//! the host. The host hands the handler a [`SessionEnv`] per call; services
//! the host cannot provide are simply absent.

/// The host's output surface.
pub trait Screen {
    /// Drop all scrollback.
    fn clear(&mut self);
}

/// Read access to the host's command history.
pub trait HistorySource {
    /// Past raw inputs, oldest first. The host owns the retention policy
    /// (bounded length, duplicate handling); the handler only reads.
    fn entries(&self) -> Vec<String>;
}

/// Optional hook for applying a theme change in the host UI.
pub trait ThemeSink {
    fn apply(&mut self, name: &str);
}

/// Everything a local command may touch, supplied per call by the host.
pub struct SessionEnv<'a> {
    /// Output surface; `clear`/`cls` go here.
    pub screen: &'a mut dyn Screen,
    /// Command history; read by `history`.
    pub history: &'a dyn HistorySource,
    /// Theme hook, absent when the host cannot change themes.
    pub theme: Option<&'a mut dyn ThemeSink>,
}

//! Uniform result record and the timing wrapper around every execution path.

use std::time::Instant;

/// Outcome of executing one submitted line, whichever executor ran it.
///
/// This is the only thing the host consumes; it is constructed once at the
/// end of a handler invocation and never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Text to display; may be empty.
    pub output: String,
    /// 0 success, 1 failure.
    pub exit_code: i32,
    /// Wall-clock milliseconds spent executing, measured on every path.
    pub duration_ms: u64,
    /// Human-readable cause, present exactly when `exit_code` is 1.
    pub error: Option<String>,
}

impl CommandResult {
    /// Successful result with the given output.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            exit_code: 0,
            duration_ms: 0,
            error: None,
        }
    }

    /// Failed result with an empty output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            exit_code: 1,
            duration_ms: 0,
            error: Some(error.into()),
        }
    }

    /// Failed result that still carries output to display.
    pub fn failure_with_output(output: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            exit_code: 1,
            duration_ms: 0,
            error: Some(error.into()),
        }
    }

    /// True when the command succeeded.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run a handler body and stamp its wall-clock duration on the result.
pub(crate) async fn timed<F>(body: F) -> CommandResult
where
    F: Future<Output = CommandResult>,
{
    let start = Instant::now();
    let mut result = body.await;
    result.duration_ms = start.elapsed().as_millis() as u64;
    result
}

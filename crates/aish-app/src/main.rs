//! aish demo host: a line-based REPL around the interpreter.
//!
//! The interpreter runs in its own task; the REPL sends numbered lines in
//! and applies numbered results coming back. Ctrl-C while a command is in
//! flight only stops the result from being applied — the command itself
//! runs to completion in the shell task and its late result is discarded
//! by the sequence check.

mod config;
mod history;
mod terminal;
mod vfs_setup;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use aish_platform::{CannedChat, StubRunner};
use aish_shell::{CommandResult, Interpreter, SessionEnv};
use aish_vfs::MemoryFs;

use config::ShellConfig;
use history::CommandHistory;
use terminal::{CliScreen, ThemeState};

/// One executed command: sequence number, working directory afterwards,
/// and the interpreter's result.
type ShellReply = (u64, String, CommandResult);

/// The interpreter and everything session-scoped it may touch.
struct Shell {
    interpreter: Interpreter,
    screen: CliScreen,
    history: CommandHistory,
    theme: ThemeState,
}

impl Shell {
    /// Serialize command execution: one line in, one result out.
    async fn run(mut self, mut lines: mpsc::Receiver<(u64, String)>, replies: mpsc::Sender<ShellReply>) {
        while let Some((seq, line)) = lines.recv().await {
            self.history.push(&line);
            let mut session = SessionEnv {
                screen: &mut self.screen,
                history: &self.history,
                theme: Some(&mut self.theme),
            };
            let result = self.interpreter.execute(&line, &mut session).await;
            let cwd = self.interpreter.cwd().to_string();
            if replies.send((seq, cwd, result)).await.is_err() {
                break;
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ShellConfig::load()?;
    log::info!("Starting aish v{}", env!("CARGO_PKG_VERSION"));

    let fs = Arc::new(MemoryFs::new());
    vfs_setup::populate_demo_fs(&fs).await?;

    let interpreter = Interpreter::new(
        Arc::clone(&fs) as Arc<dyn aish_vfs::FileStore>,
        Arc::new(StubRunner::new()),
        Arc::new(CannedChat::new()),
        &config.theme,
    );
    let shell = Shell {
        interpreter,
        screen: CliScreen,
        history: CommandHistory::new(config.history_limit),
        theme: ThemeState::new(&config.theme),
    };

    let (line_tx, line_rx) = mpsc::channel(1);
    let (reply_tx, reply_rx) = mpsc::channel(4);

    // Single-threaded on purpose: the shell task and the REPL cooperate on
    // one local set, and the channel serializes command execution.
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            tokio::task::spawn_local(shell.run(line_rx, reply_tx));
            repl(&config, line_tx, reply_rx).await
        })
        .await
}

/// Read lines, submit them, apply results.
async fn repl(
    config: &ShellConfig,
    lines_out: mpsc::Sender<(u64, String)>,
    mut replies: mpsc::Receiver<ShellReply>,
) -> Result<()> {
    let mut reader = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut cwd = String::from("/home/user");
    let mut seq: u64 = 0;

    println!(
        "aish v{} -- type 'help' to get started",
        env!("CARGO_PKG_VERSION")
    );
    loop {
        print!("{cwd} {} ", config.prompt);
        std::io::stdout().flush()?;

        let Some(line) = reader.next_line().await? else {
            break; // EOF
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        seq += 1;
        if lines_out.send((seq, line)).await.is_err() {
            break;
        }

        let applied = loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!("^C");
                    break None;
                },
                reply = replies.recv() => match reply {
                    Some((s, new_cwd, result)) if s == seq => break Some((new_cwd, result)),
                    // Late result of an interrupted command; never applied.
                    Some(_) => continue,
                    None => break None,
                },
            }
        };

        if let Some((new_cwd, result)) = applied {
            cwd = new_cwd;
            render(&result);
        }
    }

    Ok(())
}

fn render(result: &CommandResult) {
    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    if result.exit_code != 0 {
        let reason = result.error.as_deref().unwrap_or("command failed");
        println!("Error: {reason}");
    }
    log::debug!("command finished in {} ms", result.duration_ms);
}

//! System commands: virtual file store and program execution.
//!
//! The executor owns the session's working directory. Command names it does
//! not recognize are not errors here; `SystemCommand::resolve` returns
//! `None` and the interpreter falls through to the natural-language path.

use std::sync::Arc;

use aish_platform::ProgramRunner;
use aish_vfs::FileStore;
use log::{debug, warn};

use crate::parser::ParsedCommand;
use crate::result::{CommandResult, timed};

/// Default directory for `cd` with no argument.
const HOME: &str = "/home/user";

/// Closed set of recognized system commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Ls,
    Cd,
    Pwd,
    Cat,
    Echo,
    Mkdir,
    Rm,
    Cp,
    Mv,
    Run,
    Load,
    Save,
    List,
}

impl SystemCommand {
    /// First stage of the resolution pipeline. `None` means the name is not
    /// a system command and the line belongs to the next resolver.
    pub fn resolve(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "ls" | "dir" => Some(Self::Ls),
            "cd" => Some(Self::Cd),
            "pwd" => Some(Self::Pwd),
            "cat" => Some(Self::Cat),
            "echo" => Some(Self::Echo),
            "mkdir" => Some(Self::Mkdir),
            "rm" => Some(Self::Rm),
            "cp" => Some(Self::Cp),
            "mv" => Some(Self::Mv),
            "run" => Some(Self::Run),
            "load" => Some(Self::Load),
            "save" => Some(Self::Save),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// Resolve a possibly-relative path against the current working directory.
///
/// Used for the delegated operations (ls, cat, rm); `cd` has its own update
/// rule and does not go through here.
fn resolve_path(cwd: &str, input: &str) -> String {
    let raw = if input.starts_with('/') {
        input.to_string()
    } else if cwd == "/" {
        format!("/{input}")
    } else {
        format!("{cwd}/{input}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Executor for system commands.
///
/// Owns the working directory for the lifetime of the interpreter; nothing
/// else mutates it.
pub struct SystemExecutor {
    cwd: String,
    files: Arc<dyn FileStore>,
    programs: Arc<dyn ProgramRunner>,
}

impl SystemExecutor {
    pub fn new(files: Arc<dyn FileStore>, programs: Arc<dyn ProgramRunner>) -> Self {
        Self {
            cwd: HOME.to_string(),
            files,
            programs,
        }
    }

    /// The session's current working directory.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Execute one resolved system command.
    pub async fn execute(&mut self, command: SystemCommand, parsed: &ParsedCommand) -> CommandResult {
        timed(async {
            debug!("system command: {command:?}");
            match command {
                SystemCommand::Ls => self.execute_ls(parsed).await,
                SystemCommand::Cd => self.execute_cd(parsed),
                SystemCommand::Pwd => CommandResult::success(self.cwd.clone()),
                SystemCommand::Cat => self.execute_cat(parsed).await,
                SystemCommand::Echo => CommandResult::success(parsed.args.join(" ")),
                SystemCommand::Mkdir => match parsed.args.first() {
                    Some(dir) => CommandResult::success(format!("Directory created: {dir}")),
                    None => CommandResult::failure("mkdir: missing directory operand"),
                },
                SystemCommand::Rm => self.execute_rm(parsed).await,
                SystemCommand::Cp => Self::execute_copy_like(parsed, "cp", "Copied"),
                SystemCommand::Mv => Self::execute_copy_like(parsed, "mv", "Moved"),
                SystemCommand::Run => self.execute_run(parsed).await,
                SystemCommand::Load => match parsed.args.first() {
                    Some(file) => CommandResult::success(format!("Loaded program from {file}")),
                    None => CommandResult::failure("load: missing file name"),
                },
                SystemCommand::Save => match parsed.args.first() {
                    Some(file) => CommandResult::success(format!("Saved program to {file}")),
                    None => CommandResult::failure("save: missing file name"),
                },
                SystemCommand::List => CommandResult::success("No program loaded"),
            }
        })
        .await
    }

    async fn execute_ls(&self, parsed: &ParsedCommand) -> CommandResult {
        let arg = parsed.args.first().map(String::as_str).unwrap_or(".");
        let target = resolve_path(&self.cwd, arg);
        match self.files.list(&target).await {
            Ok(listing) => CommandResult::success(listing),
            Err(e) => {
                warn!("ls failed for {target}: {e}");
                CommandResult::failure(format!("ls: cannot access '{arg}': {e}"))
            },
        }
    }

    /// Update the working directory.
    ///
    /// Absolute paths replace it outright, `..` pops the last segment, `.`
    /// is a no-op, anything else is appended. The append collapses only the
    /// first `//` occurrence; chained relative navigation can leave residual
    /// double slashes. Known quirk, kept on purpose.
    fn execute_cd(&mut self, parsed: &ParsedCommand) -> CommandResult {
        self.cwd = match parsed.args.first().map(String::as_str) {
            None => HOME.to_string(),
            Some(".") => self.cwd.clone(),
            Some("..") => match self.cwd.rfind('/') {
                Some(0) | None => "/".to_string(),
                Some(i) => self.cwd[..i].to_string(),
            },
            Some(path) if path.starts_with('/') => path.to_string(),
            Some(path) => format!("{}/{path}", self.cwd).replacen("//", "/", 1),
        };
        CommandResult::success(self.cwd.clone())
    }

    async fn execute_cat(&self, parsed: &ParsedCommand) -> CommandResult {
        let Some(arg) = parsed.args.first() else {
            return CommandResult::failure("cat: missing file operand");
        };
        let target = resolve_path(&self.cwd, arg);
        match self.files.read(&target).await {
            Ok(content) => CommandResult::success(content),
            Err(e) => {
                warn!("cat failed for {target}: {e}");
                CommandResult::failure(format!("cat: {arg}: {e}"))
            },
        }
    }

    async fn execute_rm(&self, parsed: &ParsedCommand) -> CommandResult {
        let Some(arg) = parsed.args.first() else {
            return CommandResult::failure("rm: missing file operand");
        };
        let target = resolve_path(&self.cwd, arg);
        match self.files.delete(&target).await {
            Ok(confirmation) => CommandResult::success(confirmation),
            Err(e) => {
                warn!("rm failed for {target}: {e}");
                CommandResult::failure(format!("rm: cannot remove '{arg}': {e}"))
            },
        }
    }

    fn execute_copy_like(parsed: &ParsedCommand, name: &str, verb: &str) -> CommandResult {
        if parsed.args.len() < 2 {
            return CommandResult::failure(format!("{name}: missing source or destination"));
        }
        let src = &parsed.args[0];
        let dst = &parsed.args[1];
        CommandResult::success(format!("{verb} {src} to {dst}"))
    }

    async fn execute_run(&self, parsed: &ParsedCommand) -> CommandResult {
        if parsed.args.is_empty() {
            return CommandResult::failure("run: missing code operand");
        }
        let code = parsed.args.join(" ");
        match self.programs.run(&code).await {
            Ok(outcome) => {
                let mut output = outcome.output.clone();
                if let Some(explanation) = outcome.explanation {
                    if output.is_empty() {
                        output = explanation;
                    } else {
                        output.push('\n');
                        output.push_str(&explanation);
                    }
                }
                if outcome.success {
                    CommandResult::success(output)
                } else {
                    let error = if outcome.output.is_empty() {
                        "Program execution failed".to_string()
                    } else {
                        outcome.output
                    };
                    CommandResult::failure_with_output(output, error)
                }
            },
            Err(e) => {
                warn!("program runner failed: {e}");
                CommandResult::failure(format!("run: {e}"))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aish_platform::{RunOutcome, StubRunner};
    use aish_types::error::{AishError, Result};
    use aish_vfs::MemoryFs;
    use async_trait::async_trait;
    use crate::parser::parse;

    fn demo_fs() -> Arc<MemoryFs> {
        let fs = MemoryFs::new();
        fs.mkdir("/home/user").unwrap();
        fs.mkdir("/etc").unwrap();
        Arc::new(fs)
    }

    fn executor_with(fs: Arc<MemoryFs>) -> SystemExecutor {
        SystemExecutor::new(fs, Arc::new(StubRunner::new()))
    }

    async fn run_line(executor: &mut SystemExecutor, input: &str) -> CommandResult {
        let parsed = parse(input);
        let command = SystemCommand::resolve(&parsed.command).expect("known system command");
        executor.execute(command, &parsed).await
    }

    #[test]
    fn resolve_known_names() {
        assert_eq!(SystemCommand::resolve("ls"), Some(SystemCommand::Ls));
        assert_eq!(SystemCommand::resolve("dir"), Some(SystemCommand::Ls));
        assert_eq!(SystemCommand::resolve("CD"), Some(SystemCommand::Cd));
        assert_eq!(SystemCommand::resolve("foobar"), None);
        assert_eq!(SystemCommand::resolve(""), None);
    }

    #[test]
    fn resolve_path_basics() {
        assert_eq!(resolve_path("/home/user", "notes.txt"), "/home/user/notes.txt");
        assert_eq!(resolve_path("/home/user", "/etc"), "/etc");
        assert_eq!(resolve_path("/home/user", "."), "/home/user");
        assert_eq!(resolve_path("/home/user", ".."), "/home");
        assert_eq!(resolve_path("/", "x"), "/x");
    }

    #[test]
    fn resolve_path_tolerates_double_slashes() {
        // cd's append quirk can leave // in the cwd; empty components are
        // skipped here so delegated operations still find their targets.
        assert_eq!(resolve_path("/home//user", "f.txt"), "/home/user/f.txt");
    }

    #[tokio::test]
    async fn pwd_is_idempotent() {
        let mut executor = executor_with(demo_fs());
        let first = run_line(&mut executor, "pwd").await;
        let second = run_line(&mut executor, "pwd").await;
        assert_eq!(first.output, "/home/user");
        assert_eq!(second.output, "/home/user");
    }

    #[tokio::test]
    async fn cd_absolute_replaces() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "cd /etc").await;
        assert!(result.is_success());
        assert_eq!(executor.cwd(), "/etc");
    }

    #[tokio::test]
    async fn cd_dotdot_pops_segment() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "cd ..").await;
        assert!(result.is_success());
        assert_eq!(executor.cwd(), "/home");
    }

    #[tokio::test]
    async fn cd_dotdot_stops_at_root() {
        let mut executor = executor_with(demo_fs());
        run_line(&mut executor, "cd /").await;
        run_line(&mut executor, "cd ..").await;
        assert_eq!(executor.cwd(), "/");
    }

    #[tokio::test]
    async fn cd_dot_is_noop() {
        let mut executor = executor_with(demo_fs());
        run_line(&mut executor, "cd .").await;
        assert_eq!(executor.cwd(), "/home/user");
    }

    #[tokio::test]
    async fn cd_without_argument_goes_home() {
        let mut executor = executor_with(demo_fs());
        run_line(&mut executor, "cd /etc").await;
        run_line(&mut executor, "cd").await;
        assert_eq!(executor.cwd(), "/home/user");
    }

    #[tokio::test]
    async fn cd_relative_appends() {
        let mut executor = executor_with(demo_fs());
        run_line(&mut executor, "cd /home").await;
        run_line(&mut executor, "cd user").await;
        assert_eq!(executor.cwd(), "/home/user");
    }

    #[tokio::test]
    async fn cd_from_root_collapses_leading_double_slash() {
        let mut executor = executor_with(demo_fs());
        run_line(&mut executor, "cd /").await;
        run_line(&mut executor, "cd etc").await;
        assert_eq!(executor.cwd(), "/etc");
    }

    #[tokio::test]
    async fn cd_collapses_only_the_first_double_slash() {
        let mut executor = executor_with(demo_fs());
        run_line(&mut executor, "cd /").await;
        let result = run_line(&mut executor, "cd deep//nested").await;
        assert!(result.is_success());
        // The append collapses a single occurrence; the one inside the
        // argument survives. Known quirk, kept on purpose.
        assert_eq!(executor.cwd(), "/deep//nested");
    }

    #[tokio::test]
    async fn cd_never_fails_on_missing_directories() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "cd /does/not/exist").await;
        assert!(result.is_success());
        assert_eq!(executor.cwd(), "/does/not/exist");
    }

    #[tokio::test]
    async fn ls_lists_cwd_by_default() {
        let fs = demo_fs();
        let mut executor = executor_with(Arc::clone(&fs));
        seed_file(&fs, "/home/user/readme.txt", "hello").await;
        let result = run_line(&mut executor, "ls").await;
        assert!(result.is_success());
        assert!(result.output.contains("readme.txt"));
    }

    #[tokio::test]
    async fn ls_missing_path_is_wrapped() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "ls /ghost").await;
        assert_eq!(result.exit_code, 1);
        let error = result.error.unwrap();
        assert!(error.starts_with("ls: cannot access '/ghost':"));
    }

    #[tokio::test]
    async fn cat_reads_relative_to_cwd() {
        let fs = demo_fs();
        let mut executor = executor_with(Arc::clone(&fs));
        seed_file(&fs, "/home/user/notes.txt", "remember the milk").await;
        let result = run_line(&mut executor, "cat notes.txt").await;
        assert_eq!(result.output, "remember the milk");
    }

    #[tokio::test]
    async fn cat_without_argument_is_usage_error() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "cat").await;
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.error.as_deref(), Some("cat: missing file operand"));
    }

    #[tokio::test]
    async fn cat_missing_file_is_wrapped() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "cat ghost.txt").await;
        assert_eq!(result.exit_code, 1);
        let error = result.error.unwrap();
        assert!(error.starts_with("cat: ghost.txt:"));
        assert!(result.output.is_empty());
    }

    #[tokio::test]
    async fn echo_joins_args() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "echo hello   world").await;
        assert_eq!(result.output, "hello world");
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn echo_without_args_is_empty() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "echo").await;
        assert_eq!(result.output, "");
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn mkdir_is_acknowledged_without_capability_call() {
        let fs = demo_fs();
        let mut executor = executor_with(Arc::clone(&fs));
        let result = run_line(&mut executor, "mkdir projects").await;
        assert_eq!(result.output, "Directory created: projects");
        // Acknowledged only: the store has no new directory.
        assert!(!fs.exists("/home/user/projects"));
    }

    #[tokio::test]
    async fn mkdir_without_argument_is_usage_error() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "mkdir").await;
        assert_eq!(result.error.as_deref(), Some("mkdir: missing directory operand"));
    }

    #[tokio::test]
    async fn rm_deletes_through_capability() {
        let fs = demo_fs();
        let mut executor = executor_with(Arc::clone(&fs));
        seed_file(&fs, "/home/user/junk.txt", "x").await;
        let result = run_line(&mut executor, "rm junk.txt").await;
        assert!(result.is_success());
        assert!(!fs.exists("/home/user/junk.txt"));
    }

    #[tokio::test]
    async fn rm_missing_file_is_wrapped() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "rm ghost.txt").await;
        assert_eq!(result.exit_code, 1);
        assert!(result.error.unwrap().starts_with("rm: cannot remove 'ghost.txt':"));
    }

    #[tokio::test]
    async fn cp_and_mv_need_two_arguments() {
        let mut executor = executor_with(demo_fs());
        let cp = run_line(&mut executor, "cp only-one").await;
        assert_eq!(cp.error.as_deref(), Some("cp: missing source or destination"));
        let mv = run_line(&mut executor, "mv").await;
        assert_eq!(mv.error.as_deref(), Some("mv: missing source or destination"));
    }

    #[tokio::test]
    async fn cp_and_mv_acknowledge_both_paths() {
        let mut executor = executor_with(demo_fs());
        let cp = run_line(&mut executor, "cp a.txt b.txt").await;
        assert_eq!(cp.output, "Copied a.txt to b.txt");
        let mv = run_line(&mut executor, "mv a.txt b.txt").await;
        assert_eq!(mv.output, "Moved a.txt to b.txt");
    }

    #[tokio::test]
    async fn run_joins_args_and_appends_explanation() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "run PRINT 1").await;
        assert!(result.is_success());
        assert!(result.output.contains("Accepted 7 bytes"));
        assert!(result.output.contains("No execution engine"));
    }

    #[tokio::test]
    async fn run_without_code_is_usage_error() {
        let mut executor = executor_with(demo_fs());
        let result = run_line(&mut executor, "run").await;
        assert_eq!(result.error.as_deref(), Some("run: missing code operand"));
    }

    #[tokio::test]
    async fn run_failure_outcome_sets_exit_code() {
        struct FailingProgram;
        #[async_trait]
        impl ProgramRunner for FailingProgram {
            async fn run(&self, _code: &str) -> Result<RunOutcome> {
                Ok(RunOutcome {
                    output: "?SYNTAX ERROR".to_string(),
                    success: false,
                    explanation: None,
                })
            }
        }
        let mut executor =
            SystemExecutor::new(demo_fs(), Arc::new(FailingProgram));
        let result = run_line(&mut executor, "run PRNT 1").await;
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.output, "?SYNTAX ERROR");
        assert_eq!(result.error.as_deref(), Some("?SYNTAX ERROR"));
    }

    #[tokio::test]
    async fn run_capability_error_is_caught() {
        struct BrokenRunner;
        #[async_trait]
        impl ProgramRunner for BrokenRunner {
            async fn run(&self, _code: &str) -> Result<RunOutcome> {
                Err(AishError::Program("engine offline".to_string()))
            }
        }
        let mut executor = SystemExecutor::new(demo_fs(), Arc::new(BrokenRunner));
        let result = run_line(&mut executor, "run PRINT 1").await;
        assert_eq!(result.exit_code, 1);
        assert!(result.error.unwrap().contains("engine offline"));
    }

    #[tokio::test]
    async fn load_save_list_are_acknowledged() {
        let mut executor = executor_with(demo_fs());
        let load = run_line(&mut executor, "load game.bas").await;
        assert_eq!(load.output, "Loaded program from game.bas");
        let save = run_line(&mut executor, "save game.bas").await;
        assert_eq!(save.output, "Saved program to game.bas");
        let list = run_line(&mut executor, "list").await;
        assert_eq!(list.output, "No program loaded");
    }

    #[tokio::test]
    async fn load_save_without_argument_are_usage_errors() {
        let mut executor = executor_with(demo_fs());
        let load = run_line(&mut executor, "load").await;
        assert_eq!(load.error.as_deref(), Some("load: missing file name"));
        let save = run_line(&mut executor, "save").await;
        assert_eq!(save.error.as_deref(), Some("save: missing file name"));
    }

    async fn seed_file(fs: &MemoryFs, path: &str, content: &str) {
        FileStore::write(fs, path, content).await.unwrap();
    }
}

use std::fs::File;
use std::io::{self, Write};
use std::thread;

use crate::core::commands::{BuiltinRegistry, CommandError};
use crate::core::state::SessionState;
use crate::highlight::SyntaxHighlighter;
use crate::parser::{self, Directive};
use crate::path::PathExpander;
use crate::process::{ProcessLauncher, Sink};

/// Runs classified lines: built-ins through the registry, everything else
/// through the process launcher.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    registry: BuiltinRegistry,
    launcher: ProcessLauncher,
    path_expander: PathExpander,
    highlighter: SyntaxHighlighter,
}

impl Executor {
    pub fn new() -> Self {
        Self {
            registry: BuiltinRegistry::new(),
            launcher: ProcessLauncher::new(),
            path_expander: PathExpander::new(),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    pub fn registry(&self) -> &BuiltinRegistry {
        &self.registry
    }

    /// Classifies `line` and executes it.
    pub fn execute_line(&self, line: &str, state: &SessionState) {
        let directives = parser::classify(line);
        log::debug!("classified {:?} into {:?}", line, directives);
        self.execute(&directives, state);
    }

    /// Parallel directives run first, then sequential ones, then the rest in
    /// line order. Each group finishes before the next one starts.
    pub fn execute(&self, directives: &[Directive], state: &SessionState) {
        if directives.is_empty() {
            return;
        }

        let mut parallel = Vec::new();
        let mut sequential = Vec::new();
        let mut others = Vec::new();
        for directive in directives {
            match directive {
                Directive::Parallel(tokens) => parallel.push(tokens.as_slice()),
                Directive::Sequential(tokens) => sequential.push(tokens.as_slice()),
                _ => others.push(directive),
            }
        }
        log::debug!(
            "buckets: {} parallel, {} sequential, {} other",
            parallel.len(),
            sequential.len(),
            others.len()
        );

        if !parallel.is_empty() {
            self.execute_parallel(&parallel, state);
        }

        for tokens in sequential {
            self.run_one_reported(tokens, state);
        }

        for directive in others {
            match directive {
                Directive::Redirected { tokens, target } => {
                    if let Err(e) = self.run_redirected(tokens, target, state) {
                        self.report(&e);
                    }
                }
                Directive::Plain(tokens) => self.run_one_reported(tokens, state),
                Directive::Malformed(message) => {
                    println!("{}", self.highlighter.highlight_error(message));
                }
                Directive::Parallel(_) | Directive::Sequential(_) => {}
            }
        }
    }

    /// Starts one thread per command and waits for all of them.
    fn execute_parallel(&self, commands: &[&[String]], state: &SessionState) {
        thread::scope(|scope| {
            let handles: Vec<_> = commands
                .iter()
                .map(|&tokens| scope.spawn(move || self.run_one_reported(tokens, state)))
                .collect();

            for (handle, tokens) in handles.into_iter().zip(commands) {
                if handle.join().is_err() {
                    log::warn!("parallel command {:?} panicked", tokens);
                }
            }
        });
    }

    fn run_one_reported(&self, tokens: &[String], state: &SessionState) {
        let mut stdout = io::stdout();
        if let Err(e) = self.run_one(tokens, state, &mut stdout) {
            self.report(&e);
        }
    }

    /// Runs a single command to completion. Built-ins write to `out`;
    /// external programs inherit the shell's own streams.
    pub fn run_one(
        &self,
        tokens: &[String],
        state: &SessionState,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let Some((command, args)) = tokens.split_first() else {
            return Ok(());
        };

        if let Some(result) = self.registry.execute(command, state, args, out) {
            return result;
        }

        log::debug!("external {:?} in {}", tokens, state.current_dir().display());
        self.launcher
            .spawn(tokens, &state.current_dir(), Sink::Inherit, Sink::Inherit)?;
        Ok(())
    }

    /// Runs a single command with its standard output sent to `target`,
    /// which is created or truncated first.
    pub fn run_redirected(
        &self,
        tokens: &[String],
        target: &str,
        state: &SessionState,
    ) -> Result<(), CommandError> {
        let Some((command, args)) = tokens.split_first() else {
            return Ok(());
        };

        let path = self
            .path_expander
            .join(&state.current_dir(), target)
            .map_err(|e| CommandError::ExecutionError(e.to_string()))?;
        let mut file =
            File::create(&path).map_err(|e| CommandError::Redirect(target.to_string(), e))?;
        log::debug!("redirecting {:?} to {}", tokens, path.display());

        // The file is closed when it drops, whatever the command did.
        if self.registry.is_builtin(command) {
            // A built-in's own diagnostics belong to its output, the file.
            if let Some(Err(e)) = self.registry.execute(command, state, args, &mut file) {
                writeln!(file, "{}", e)?;
            }
            Ok(())
        } else {
            self.launcher
                .spawn(tokens, &state.current_dir(), Sink::File(file), Sink::Pipe)?;
            Ok(())
        }
    }

    fn report(&self, error: &CommandError) {
        println!("{}", self.highlighter.highlight_error(&error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use std::time::{Duration, Instant};

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_empty_line_is_noop() {
        let executor = Executor::new();
        let state = SessionState::with_dir("/");
        executor.execute_line("   ", &state);
        executor.execute(&[], &state);
        assert!(state.is_running());
        assert_eq!(state.current_dir(), Path::new("/"));
    }

    #[test]
    fn test_run_one_builtin_writes_to_sink() -> Result<(), CommandError> {
        let executor = Executor::new();
        let state = SessionState::with_dir("/");
        let mut out = Vec::new();
        executor.run_one(&tokens("echo 'quoted text'"), &state, &mut out)?;
        assert_eq!(String::from_utf8_lossy(&out), "quoted text\n");
        Ok(())
    }

    #[test]
    fn test_run_one_empty_tokens() {
        let executor = Executor::new();
        let state = SessionState::with_dir("/");
        let mut out = Vec::new();
        assert!(executor.run_one(&[], &state, &mut out).is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_command_keeps_shell_running() {
        let executor = Executor::new();
        let state = SessionState::with_dir("/");
        let result = executor.run_one(&tokens("badcommand-ramus-9911"), &state, &mut Vec::new());

        let err = result.expect_err("command should not exist");
        assert_eq!(err.to_string(), "badcommand-ramus-9911: command not found");
        executor.execute_line("badcommand-ramus-9911", &state);
        assert!(state.is_running());
    }

    #[test]
    fn test_external_runs_in_session_dir() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());

        executor.run_one(&tokens("touch created.txt"), &state, &mut Vec::new())?;
        assert!(dir.path().join("created.txt").is_file());
        Ok(())
    }

    #[test]
    fn test_ls_redirected_to_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("b.txt"), "")?;
        fs::write(dir.path().join("a.txt"), "")?;
        fs::write(dir.path().join("out.txt"), "stale content that must go away")?;

        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());
        executor.execute_line("ls > out.txt", &state);

        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt"))?,
            "a.txt\nb.txt\nout.txt\n"
        );
        Ok(())
    }

    #[test]
    fn test_external_redirected_to_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());

        executor.run_redirected(&tokens("printf hello"), "greeting.txt", &state)?;
        assert_eq!(fs::read_to_string(dir.path().join("greeting.txt"))?, "hello");
        Ok(())
    }

    #[test]
    fn test_redirect_open_failure_aborts_directive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());

        let result = executor.run_redirected(&tokens("echo hi"), "missing/sub/out.txt", &state);
        assert!(matches!(result, Err(CommandError::Redirect(target, _)) if target == "missing/sub/out.txt"));
        assert!(!dir.path().join("missing").exists());
        Ok(())
    }

    #[test]
    fn test_failed_builtin_under_redirect_leaves_console_alone(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());

        executor.run_redirected(&tokens("cat"), "out.txt", &state)?;
        executor.run_redirected(&tokens("cd nowhere"), "cd.txt", &state)?;
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt"))?,
            "cat: file name required\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("cd.txt"))?,
            "directory not found\n"
        );
        assert_eq!(state.current_dir(), dir.path());

        // A later plain built-in still writes to its own sink.
        let mut out = Vec::new();
        executor.run_one(&tokens("echo after"), &state, &mut out)?;
        assert_eq!(String::from_utf8_lossy(&out), "after\n");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_redirect_target_follows_symlinks() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("real").join("sub"))?;
        std::os::unix::fs::symlink(dir.path().join("real").join("sub"), dir.path().join("link"))?;

        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());
        executor.execute_line("echo x > link/../red.txt", &state);

        assert_eq!(fs::read_to_string(dir.path().join("real").join("red.txt"))?, "x\n");
        assert!(!dir.path().join("red.txt").exists());
        Ok(())
    }

    #[test]
    fn test_parallel_waits_for_every_command() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());

        let start = Instant::now();
        executor.execute_line(
            "sleep 0.3 & touch one & sleep 0.2 & touch two & touch three",
            &state,
        );
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(300));
        // Sleeps overlap instead of adding up.
        assert!(elapsed < Duration::from_millis(2000));
        for name in ["one", "two", "three"] {
            assert!(dir.path().join(name).is_file(), "missing {}", name);
        }
        Ok(())
    }

    #[test]
    fn test_parallel_failure_does_not_stop_siblings() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());

        executor.execute_line("badcommand-ramus-9911 & touch survivor", &state);
        assert!(dir.path().join("survivor").is_file());
        assert!(state.is_running());
        Ok(())
    }

    #[test]
    fn test_sequence_runs_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let root = tempfile::tempdir()?;
        fs::create_dir(root.path().join("inner"))?;
        let executor = Executor::new();
        let state = SessionState::with_dir(root.path());

        executor.execute_line("cd inner ; touch marker ; cd ..", &state);

        assert!(root.path().join("inner").join("marker").is_file());
        assert_eq!(state.current_dir(), root.path());
        Ok(())
    }

    #[test]
    fn test_buckets_run_parallel_then_sequential_then_rest(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let executor = Executor::new();
        let state = SessionState::with_dir(dir.path());

        let directives = vec![
            Directive::Redirected {
                tokens: tokens("ls"),
                target: "listing.txt".to_string(),
            },
            Directive::Sequential(tokens("touch second")),
            Directive::Parallel(tokens("touch first")),
        ];
        executor.execute(&directives, &state);

        // `ls` ran last, so it saw both files.
        assert_eq!(
            fs::read_to_string(dir.path().join("listing.txt"))?,
            "first\nlisting.txt\nsecond\n"
        );
        Ok(())
    }

    #[test]
    fn test_exit_stops_session() {
        let executor = Executor::new();
        let state = SessionState::with_dir("/");
        executor.execute_line("exit", &state);
        assert!(!state.is_running());
    }
}

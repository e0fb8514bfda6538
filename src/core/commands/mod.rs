use std::collections::BTreeMap;
use std::io::Write;

mod cat;
mod cd;
mod echo;
mod exit;
mod ls;
mod pwd;

pub use cat::CatCommand;
pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use exit::{ExitCommand, FAREWELL};
pub use ls::LsCommand;
pub use pwd::PwdCommand;

use crate::core::state::SessionState;
use crate::process::ProcessError;

#[derive(Debug)]
pub enum CommandError {
    NotFound(String),
    DirectoryNotFound,
    PermissionDenied(String),
    InvalidArguments(String),
    Redirect(String, std::io::Error),
    ProcessError(ProcessError),
    ExecutionError(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NotFound(cmd) => write!(f, "{}: command not found", cmd),
            CommandError::DirectoryNotFound => write!(f, "directory not found"),
            CommandError::PermissionDenied(cmd) if cmd.is_empty() => {
                write!(f, "permission denied")
            }
            CommandError::PermissionDenied(cmd) => write!(f, "{}: permission denied", cmd),
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::Redirect(target, e) => {
                write!(f, "cannot write to file {}: {}", target, e)
            }
            CommandError::ProcessError(e) => write!(f, "execution error: {}", e),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
            CommandError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::CommandNotFound(cmd) => CommandError::NotFound(cmd),
            other => CommandError::ProcessError(other),
        }
    }
}

/// A command implemented inside the shell.
///
/// Everything a built-in prints goes to `out`, which is the console for a
/// plain command and the target file for a redirected one.
pub trait Command {
    fn execute(
        &self,
        state: &SessionState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError>;
}

#[derive(Debug, Clone)]
enum CommandType {
    Exit(ExitCommand),
    Pwd(PwdCommand),
    Cd(CdCommand),
    Cat(CatCommand),
    Ls(LsCommand),
    Echo(EchoCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        state: &SessionState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(state, args, out),
            CommandType::Pwd(cmd) => cmd.execute(state, args, out),
            CommandType::Cd(cmd) => cmd.execute(state, args, out),
            CommandType::Cat(cmd) => cmd.execute(state, args, out),
            CommandType::Ls(cmd) => cmd.execute(state, args, out),
            CommandType::Echo(cmd) => cmd.execute(state, args, out),
        }
    }
}

/// Name to handler table for the built-ins. Lookups are case-sensitive.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("cat", CommandType::Cat(CatCommand::new()));
        commands.insert("ls", CommandType::Ls(LsCommand::new()));
        commands.insert("echo", CommandType::Echo(EchoCommand::new()));
        Self { commands }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Runs `command` if it is a built-in. `None` means the name is not
    /// registered and the caller has to look elsewhere.
    pub fn execute(
        &self,
        command: &str,
        state: &SessionState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Option<Result<(), CommandError>> {
        let cmd = self.commands.get(command)?;
        log::debug!("builtin {} {:?}", command, args);
        let result = cmd.execute(state, args, out).and_then(|()| {
            out.flush()?;
            Ok(())
        });
        Some(result)
    }
}

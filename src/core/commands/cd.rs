use super::{Command, CommandError};
use crate::core::state::SessionState;
use crate::path::PathExpander;
use std::env;
use std::io::{ErrorKind, Write};

#[derive(Debug, Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        state: &SessionState,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        // Anything but exactly one argument is ignored.
        let [path_str] = args else {
            return Ok(());
        };

        let target = self
            .path_expander
            .resolve(&state.current_dir(), path_str)
            .map_err(|e| CommandError::ExecutionError(format!("cd: error - {}", e)))?;

        match std::fs::metadata(&target) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(CommandError::DirectoryNotFound),
            Err(e) => return Err(classify_io_error(e)),
        }

        env::set_current_dir(&target).map_err(classify_io_error)?;
        state.set_current_dir(&target);
        log::debug!("cd -> {}", target.display());
        Ok(())
    }
}

fn classify_io_error(e: std::io::Error) -> CommandError {
    match e.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory => CommandError::DirectoryNotFound,
        ErrorKind::PermissionDenied => CommandError::PermissionDenied(String::new()),
        _ => CommandError::ExecutionError(format!("cd: error - {}", e)),
    }
}

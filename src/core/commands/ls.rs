use std::fs;
use std::io::{ErrorKind, Write};

use super::{Command, CommandError};
use crate::core::state::SessionState;

#[derive(Debug, Clone, Default)]
pub struct LsCommand;

impl LsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for LsCommand {
    fn execute(
        &self,
        state: &SessionState,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let entries = fs::read_dir(state.current_dir()).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => CommandError::PermissionDenied("ls".to_string()),
            _ => CommandError::ExecutionError(format!("ls: error - {}", e)),
        })?;

        let mut names = entries
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CommandError::ExecutionError(format!("ls: error - {}", e)))?;
        names.sort();

        for name in names {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ls_sorted() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["zeta", "Alpha", "beta.txt"] {
            fs::write(dir.path().join(name), "")?;
        }
        fs::create_dir(dir.path().join("mid"))?;

        let state = SessionState::with_dir(dir.path());
        let mut out = Vec::new();
        assert!(LsCommand::new().execute(&state, &[], &mut out).is_ok());
        assert_eq!(String::from_utf8_lossy(&out), "Alpha\nbeta.txt\nmid\nzeta\n");
        Ok(())
    }

    #[test]
    fn test_ls_empty_dir_prints_nothing() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let state = SessionState::with_dir(dir.path());
        let mut out = Vec::new();
        assert!(LsCommand::new().execute(&state, &[], &mut out).is_ok());
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_ls_missing_dir_reports_error() {
        let state = SessionState::with_dir("/ramus/no/such/dir");
        let mut out = Vec::new();
        let result = LsCommand::new().execute(&state, &[], &mut out);
        assert!(matches!(result, Err(CommandError::ExecutionError(msg)) if msg.starts_with("ls: error - ")));
    }
}

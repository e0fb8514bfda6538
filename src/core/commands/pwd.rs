use std::io::Write;

use super::{Command, CommandError};
use crate::core::state::SessionState;

#[derive(Debug, Clone, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(
        &self,
        state: &SessionState,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        writeln!(out, "{}", state.current_dir().display())?;
        Ok(())
    }
}

use std::io::Write;

use super::{Command, CommandError};
use crate::core::state::SessionState;

pub const FAREWELL: &str = "Goodbye!";

#[derive(Debug, Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        state: &SessionState,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        state.stop();
        writeln!(out, "{}", FAREWELL)?;
        Ok(())
    }
}

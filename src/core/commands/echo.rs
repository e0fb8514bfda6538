use std::io::Write;

use super::{Command, CommandError};
use crate::core::state::SessionState;

#[derive(Debug, Clone, Default)]
pub struct EchoCommand;

impl EchoCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for EchoCommand {
    fn execute(
        &self,
        _state: &SessionState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let text = args.join(" ");
        writeln!(out, "{}", strip_quotes(&text))?;
        Ok(())
    }
}

/// Drops one pair of matching `"` or `'` wrapping the whole text.
fn strip_quotes(text: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|&quote| {
            text.strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(text)
}

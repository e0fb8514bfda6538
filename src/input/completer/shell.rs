use std::{borrow::Cow, path::PathBuf};

use super::{command::CommandCompleter, path::PathCompleter};
use crate::highlight::SyntaxHighlighter;
use crate::parser::{PARALLEL, REDIRECT, SEQUENCE};

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line-editor helper: completion for command and file names plus syntax
/// highlighting.
#[derive(Debug, Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(builtins: impl IntoIterator<Item = &'static str>, current_dir: PathBuf) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(builtins),
            path_completer: PathCompleter::new(current_dir),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    pub fn set_current_dir(&mut self, dir: PathBuf) {
        self.path_completer.set_base_dir(dir);
    }

    fn candidates(&self, line_up_to_cursor: &str, pos: usize) -> (usize, Vec<Pair>) {
        // Only the segment after the last operator matters.
        let segment_start = line_up_to_cursor
            .rfind(&[PARALLEL, SEQUENCE, REDIRECT][..])
            .map_or(0, |idx| idx + 1);
        let after_redirect = line_up_to_cursor[..segment_start].ends_with(REDIRECT);
        let segment = &line_up_to_cursor[segment_start..];

        let word_start = segment
            .char_indices()
            .filter(|(_, c)| c.is_whitespace())
            .last()
            .map_or(segment_start, |(idx, c)| segment_start + idx + c.len_utf8());
        let word = &line_up_to_cursor[word_start..pos];
        let is_first_word = segment[..word_start - segment_start].trim().is_empty();

        if is_first_word && !after_redirect {
            (word_start, self.command_completer.complete_command(word))
        } else {
            (word_start, self.path_completer.complete_path(word))
        }
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_line(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos], pos))
    }
}

use std::{borrow::Cow, collections::BTreeSet, env, fs};

use rustyline::completion::Pair;

#[derive(Debug, Clone, Default)]
pub struct CommandCompleter {
    builtins: BTreeSet<Cow<'static, str>>,
    commands: BTreeSet<Cow<'static, str>>,
}

impl CommandCompleter {
    pub fn new(builtins: impl IntoIterator<Item = &'static str>) -> Self {
        let mut completer = Self {
            builtins: builtins.into_iter().map(Cow::Borrowed).collect(),
            commands: BTreeSet::new(),
        };
        completer.refresh_commands();
        completer
    }

    /// Rescans `PATH` for executables.
    pub fn refresh_commands(&mut self) {
        self.commands.clear();

        let Some(path_var) = env::var_os("PATH") else {
            return;
        };
        for path in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(path) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_candidate = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if let (true, Some(name)) = (is_candidate, entry.file_name().to_str()) {
                    self.commands.insert(Cow::Owned(name.to_string()));
                }
            }
        }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let input = input.trim();
        let mut matches: Vec<Pair> = self
            .builtins
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: format!("{} (builtin)", cmd),
                replacement: format!("{} ", cmd),
            })
            .collect();

        matches.extend(
            self.commands
                .iter()
                .filter(|cmd| cmd.starts_with(input) && !self.builtins.contains(*cmd))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: format!("{} ", cmd),
                }),
        );

        matches
    }
}

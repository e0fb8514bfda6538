use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

use crate::path::PathExpander;

/// Completes file names relative to the session directory.
#[derive(Debug, Clone)]
pub struct PathCompleter {
    base_dir: PathBuf,
    path_expander: PathExpander,
}

impl PathCompleter {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            path_expander: PathExpander::new(),
        }
    }

    pub fn set_base_dir(&mut self, base_dir: PathBuf) {
        self.base_dir = base_dir;
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = split_input(incomplete);
        let search_dir = match self.path_expander.join(&self.base_dir, typed_dir) {
            Ok(dir) => dir,
            Err(_) => return Vec::new(),
        };

        let Ok(entries) = fs::read_dir(&search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                Some(completion_pair(typed_dir, &name, &entry.path()))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Splits `dir/partial` into the directory part as typed and the prefix
/// still being completed.
fn split_input(incomplete: &str) -> (&str, &str) {
    match incomplete.rfind('/') {
        Some(0) => ("/", &incomplete[1..]),
        Some(idx) => (&incomplete[..idx], &incomplete[idx + 1..]),
        None => (".", incomplete),
    }
}

fn completion_pair(typed_dir: &str, name: &str, path: &Path) -> Pair {
    let shown = match typed_dir {
        "." => name.to_string(),
        "/" => format!("/{}", name),
        dir => format!("{}/{}", dir, name),
    };

    if path.is_dir() {
        Pair {
            display: format!("{}/", shown),
            replacement: format!("{}/", shown),
        }
    } else {
        Pair {
            display: shown.clone(),
            replacement: format!("{} ", shown),
        }
    }
}

use std::path::{Component, Path, PathBuf};

use super::PathError;

#[derive(Debug, Clone, Copy)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expands a leading `~` and anchors relative paths at `base`. `..` is
    /// left for the OS to follow, so paths through symlinks open what they name.
    pub fn join(&self, base: &Path, path: &str) -> Result<PathBuf, PathError> {
        Ok(base.join(self.expand(path)?))
    }

    /// Like `join`, then normalizes the result lexically. Only `cd` wants this.
    pub fn resolve(&self, base: &Path, path: &str) -> Result<PathBuf, PathError> {
        Ok(normalize(&self.join(base, path)?))
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, PathError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(PathBuf::from(path))
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, PathError> {
        if path.len() == 1 {
            // Just "~"
            self.home_dir()
        } else {
            let without_tilde = &path[1..];
            if let Some(stripped) = without_tilde.strip_prefix('/') {
                // "~/path"
                let mut home_path = self.home_dir()?;
                for part in stripped.split('/') {
                    if !part.is_empty() {
                        home_path.push(part);
                    }
                }
                Ok(home_path)
            } else {
                // "~username/path" stays literal
                Ok(PathBuf::from(path))
            }
        }
    }

    pub fn home_dir(&self) -> Result<PathBuf, PathError> {
        dirs::home_dir().ok_or(PathError::HomeDirNotFound)
    }
}

/// Collapses `.`, `..` and repeated separators without touching the
/// filesystem. `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                normalized.push(component.as_os_str());
                depth = 0;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    normalized.pop();
                    depth -= 1;
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(part) => {
                normalized.push(part);
                depth += 1;
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

/// Bookkeeping owned by one shell session.
///
/// The directory held here is authoritative: commands resolve paths against
/// it instead of asking the OS. `cd` keeps the OS working directory in step.
#[derive(Debug)]
pub struct SessionState {
    current_dir: RwLock<PathBuf>,
    running: AtomicBool,
}

impl SessionState {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self::with_dir(env::current_dir()?))
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: RwLock::new(dir.into()),
            running: AtomicBool::new(true),
        }
    }

    pub fn current_dir(&self) -> PathBuf {
        self.current_dir
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_current_dir(&self, dir: &Path) {
        let mut current = self
            .current_dir
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = dir.to_path_buf();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Last path segment of the current directory, as shown in the prompt.
    pub fn dir_name(&self) -> String {
        let dir = self.current_dir();
        match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => dir.to_string_lossy().into_owned(),
        }
    }
}

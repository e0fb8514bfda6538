use std::fmt;

pub mod executor;

pub use executor::{ProcessLauncher, Sink};

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    Spawn(String, std::io::Error),
    Wait(String, std::io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "{}: command not found", cmd),
            ProcessError::Spawn(cmd, e) => write!(f, "failed to run {}: {}", cmd, e),
            ProcessError::Wait(cmd, e) => write!(f, "failed to wait for {}: {}", cmd, e),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::CommandNotFound(_) => None,
            ProcessError::Spawn(_, e) | ProcessError::Wait(_, e) => Some(e),
        }
    }
}

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use super::ProcessError;

/// Where a child's output stream goes.
#[derive(Debug)]
pub enum Sink {
    Inherit,
    File(File),
    /// Captured by the launcher and logged, never shown on the console.
    Pipe,
    /// Sent to the null device.
    Discard,
}

impl From<Sink> for Stdio {
    fn from(sink: Sink) -> Self {
        match sink {
            Sink::Inherit => Stdio::inherit(),
            Sink::File(file) => Stdio::from(file),
            Sink::Pipe => Stdio::piped(),
            Sink::Discard => Stdio::null(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Spawns `argv[0]` with the remaining arguments and blocks until it exits.
    pub fn spawn(
        &self,
        argv: &[String],
        cwd: &Path,
        stdout: Sink,
        stderr: Sink,
    ) -> Result<ExitStatus, ProcessError> {
        let Some((program, args)) = argv.split_first() else {
            return Err(ProcessError::Spawn(
                String::new(),
                std::io::Error::new(ErrorKind::InvalidInput, "empty command"),
            ));
        };

        let capture_stdout = matches!(stdout, Sink::Pipe);
        let capture_stderr = matches!(stderr, Sink::Pipe);

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(stderr);

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound && cwd.is_dir() {
                ProcessError::CommandNotFound(program.clone())
            } else {
                ProcessError::Spawn(program.clone(), e)
            }
        })?;
        log::debug!("spawned {} (pid {})", program, child.id());

        let status = if capture_stdout || capture_stderr {
            // Drain pipes while waiting so a chatty child never blocks on a full buffer.
            let output = child
                .wait_with_output()
                .map_err(|e| ProcessError::Wait(program.clone(), e))?;
            log_captured(program, "stdout", &output.stdout);
            log_captured(program, "stderr", &output.stderr);
            output.status
        } else {
            child
                .wait()
                .map_err(|e| ProcessError::Wait(program.clone(), e))?
        };

        if !status.success() {
            log::debug!("{} exited with {}", program, status);
        }
        Ok(status)
    }
}

fn log_captured(program: &str, stream: &str, bytes: &[u8]) {
    if !bytes.is_empty() {
        log::debug!(
            "{} {}: {}",
            program,
            stream,
            String::from_utf8_lossy(bytes).trim_end()
        );
    }
}

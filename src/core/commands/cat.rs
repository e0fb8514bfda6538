use std::fs;
use std::io::{ErrorKind, Write};

use super::{Command, CommandError};
use crate::core::state::SessionState;
use crate::path::PathExpander;

#[derive(Debug, Clone, Default)]
pub struct CatCommand {
    path_expander: PathExpander,
}

impl CatCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }

    fn print_file(
        &self,
        state: &SessionState,
        name: &str,
        out: &mut dyn Write,
    ) -> Result<(), String> {
        let path = self
            .path_expander
            .join(&state.current_dir(), name)
            .map_err(|e| format!("cat: error reading {}: {}", name, e))?;

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => format!("cat: {}: file not found", name),
            ErrorKind::PermissionDenied => format!("cat: {}: permission denied", name),
            _ => format!("cat: error reading {}: {}", name, e),
        })?;

        let text = String::from_utf8(bytes)
            .map_err(|_| format!("cat: {}: cannot decode file (binary file?)", name))?;

        out.write_all(text.as_bytes())
            .map_err(|e| format!("cat: error reading {}: {}", name, e))
    }
}

impl Command for CatCommand {
    fn execute(
        &self,
        state: &SessionState,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments(
                "cat: file name required".to_string(),
            ));
        }

        // A bad file is reported in place and the rest of the batch still runs.
        for name in args {
            if let Err(message) = self.print_file(state, name, out) {
                writeln!(out, "{}", message)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cat(state: &SessionState, args: &[&str]) -> (Result<(), CommandError>, String) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let result = CatCommand::new().execute(state, &args, &mut out);
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_cat_prints_verbatim() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.txt"), "first")?;
        fs::write(dir.path().join("b.txt"), "second\n")?;

        let state = SessionState::with_dir(dir.path());
        let (result, output) = cat(&state, &["a.txt", "b.txt"]);
        assert!(result.is_ok());
        assert_eq!(output, "firstsecond\n");
        Ok(())
    }

    #[test]
    fn test_cat_continues_past_bad_files() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("good.txt"), "ok\n")?;
        fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x80])?;

        let state = SessionState::with_dir(dir.path());
        let (result, output) = cat(&state, &["missing.txt", "blob.bin", "good.txt"]);
        assert!(result.is_ok());
        assert_eq!(
            output,
            "cat: missing.txt: file not found\n\
             cat: blob.bin: cannot decode file (binary file?)\n\
             ok\n"
        );
        Ok(())
    }

    #[test]
    fn test_cat_absolute_path() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("abs.txt");
        fs::write(&file, "absolute")?;

        let state = SessionState::with_dir("/");
        let path = file.to_string_lossy().into_owned();
        let (result, output) = cat(&state, &[path.as_str()]);
        assert!(result.is_ok());
        assert_eq!(output, "absolute");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_cat_follows_symlinks_before_parent() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("real").join("sub"))?;
        fs::write(dir.path().join("real").join("data.txt"), "REAL\n")?;
        fs::write(dir.path().join("data.txt"), "TOP\n")?;
        std::os::unix::fs::symlink(dir.path().join("real").join("sub"), dir.path().join("link"))?;

        let state = SessionState::with_dir(dir.path());
        let (result, output) = cat(&state, &["link/../data.txt"]);
        assert!(result.is_ok());
        assert_eq!(output, "REAL\n");
        Ok(())
    }

    #[test]
    fn test_cat_requires_a_file() {
        let state = SessionState::with_dir("/");
        let (result, output) = cat(&state, &[]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
        assert!(output.is_empty());
    }
}

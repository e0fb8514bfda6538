use rustyline::{config::Configurer, history::DefaultHistory, Editor};

mod executor;

pub use executor::Executor;

use crate::{
    core::{commands::FAREWELL, SessionState},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
};

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, DefaultHistory>,
    pub(crate) state: SessionState,
    pub(crate) executor: Executor,
    pub(crate) highlighter: SyntaxHighlighter,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let state = SessionState::new()?;
        let executor = Executor::new();

        let completer = ShellCompleter::new(executor.registry().names(), state.current_dir());
        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        Ok(Shell {
            editor,
            state,
            executor,
            highlighter: SyntaxHighlighter::new(),
            flags,
        })
    }

    /// Runs a single line outside the interactive loop.
    pub fn run_line(&self, line: &str) {
        self.executor.execute_line(line, &self.state);
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let quiet = self.flags.is_set("quiet");

        // Ctrl-C while a child runs goes to the child; the shell stays up.
        ctrlc::set_handler(|| {
            log::debug!("interrupt received");
        })?;

        if !quiet {
            println!("Ramus - type 'exit' to leave the shell");
        }

        while self.state.is_running() {
            if let Some(helper) = self.editor.helper_mut() {
                helper.set_current_dir(self.state.current_dir());
            }

            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => self.run_line(&line),
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    if !quiet {
                        println!("Use 'exit' to leave the shell");
                    }
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("{}", FAREWELL);
                    break;
                }
                Err(e) => {
                    eprintln!("{}", self.highlighter.highlight_error(&format!("Error: {}", e)));
                }
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        self.highlighter
            .highlight_prompt(&format!("{} > ", self.state.dir_name()))
    }
}

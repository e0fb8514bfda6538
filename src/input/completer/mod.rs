mod command;
mod path;
mod shell;

pub use shell::ShellCompleter;

use log::LevelFilter;
use ramus::flags::Flags;
use ramus::shell::Shell;
use std::env;

fn main() -> Result<(), ramus::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("Ramus {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let level = if flags.is_set("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut shell = Shell::new(flags.clone())?;
    match flags.get_value("command") {
        Some(line) => shell.run_line(line),
        None => shell.run()?,
    }
    Ok(())
}

use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use log::warn;
use rbmultimap::{App, AppConfig};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

// Logs go to stderr so they never mix with the dump on stdout.
fn initialize_logging(config: &AppConfig) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = &config.log_file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(config.log_level, Config::default(), file)),
            Err(err) => eprintln!("rbapp: cannot open log file {}: {err}", path.display()),
        }
    }
    if let Err(err) = CombinedLogger::init(loggers) {
        eprintln!("rbapp: logging disabled: {err}");
    }
}

fn main() -> io::Result<()> {
    let config = AppConfig::from_env();
    initialize_logging(&config);
    if let Some(level) = &config.rejected_level {
        warn!(
            "{}={level:?} is not a log level, using {}",
            AppConfig::LEVEL_VAR,
            config.log_level
        );
    }

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    App::new().run(stdin.lock(), &mut out)?;
    out.flush()
}

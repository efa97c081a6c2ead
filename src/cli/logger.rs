//! A [`log::Log`] implementation writing through the CLI message format.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::cli::messages::{system_message, warning_message};

struct CliLogger;

static LOGGER: CliLogger = CliLogger;

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match record.level() {
            Level::Error | Level::Warn => {
                eprintln!("{}", warning_message("warn", record.args().to_string()))
            }
            Level::Info => println!("{}", system_message("engine", record.args().to_string())),
            Level::Debug | Level::Trace => {
                println!("{}", system_message("debug", record.args().to_string()))
            }
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

use std::process::ExitCode;

use clap::Parser;
use relation_engine::cli::{self, CliParser, logger, warning_message};
use relation_engine::config::Config;

fn main() -> ExitCode {
    let cli = CliParser::parse();
    let config = Config::from_env();

    if let Err(error) = logger::init(config.log.level) {
        eprintln!("{}", warning_message("system", error.to_string()));
    }

    match cli::run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", warning_message("error", error.to_string()));
            ExitCode::FAILURE
        }
    }
}

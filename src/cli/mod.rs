//! The command line side of the engine.
//!
//! - relation_engine --help | Command Line Help
//! - relation_engine demo   | Build and query the movie database.
//! - relation_engine show   | Print a saved table.

use crate::cli::messages::{highlight_argument, system_message};
use crate::config::{Config, StoreConfig};
use crate::error::RelationError;
use crate::persistence::Table;

mod colors;
pub mod demo;
pub mod logger;
mod messages;
pub mod parsers;

pub use messages::warning_message;
pub use parsers::{CliCommand, CliParser};

pub fn run(cli: CliParser, config: Config) -> Result<(), RelationError> {
    //! Dispatch a parsed command line. `--store` wins over the environment.

    let store = cli
        .store
        .map(StoreConfig::at)
        .unwrap_or(config.store);

    println!(
        "{}",
        system_message(
            "system",
            format!(
                "Using store '{}'.",
                highlight_argument(&store.directory.display().to_string())
            )
        )
    );

    match cli.command {
        CliCommand::Demo => demo::run(&store),
        CliCommand::Show { name, index } => show_table(&name, index, &store),
    }
}

fn show_table(name: &str, index: bool, store: &StoreConfig) -> Result<(), RelationError> {
    let table = Table::load(name, store)?;

    println!(
        "{}",
        system_message(
            "system",
            format!(
                "Loaded {} with {} row(s).",
                highlight_argument(table.name()),
                table.len()
            )
        )
    );

    table.print();
    if index {
        table.print_index();
    }

    Ok(())
}

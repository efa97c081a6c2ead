//! The command line parser.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relation_engine")]
#[command(about = "An in-memory relational table engine", long_about = None)]
pub struct CliParser {
    /// Directory holding table snapshots; overrides RELATION_STORE_DIR.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Build the movie database, save it, and run every operator on it.
    Demo,

    /// Load a saved table and print it.
    Show {
        name: String,

        /// Print the key index as well.
        #[arg(long)]
        index: bool,
    },
}

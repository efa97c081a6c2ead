//! Runtime configuration, read from the environment.
//!
//! A `.env` file in the working directory is loaded first (through
//! [`dotenvy`]) so the settings can live next to the store.
//!
//! - `RELATION_STORE_DIR`: directory holding table snapshots (default `store`)
//! - `RELATION_LOG`: maximum log level (default `info`)

use std::env;
use std::path::{Path, PathBuf};

use log::LevelFilter;

pub const STORE_DIR_VAR: &str = "RELATION_STORE_DIR";
pub const LOG_LEVEL_VAR: &str = "RELATION_LOG";

const DEFAULT_STORE_DIR: &str = "store";
const SNAPSHOT_EXTENSION: &str = "dbf";

/// Where table snapshots are written, one `<name>.<extension>` file per table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub directory: PathBuf,
    pub extension: String,
}

impl StoreConfig {
    pub fn at<P: AsRef<Path>>(directory: P) -> StoreConfig {
        StoreConfig {
            directory: directory.as_ref().to_path_buf(),
            extension: SNAPSHOT_EXTENSION.to_string(),
        }
    }

    pub fn path_for(&self, table_name: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", table_name, self.extension))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::at(DEFAULT_STORE_DIR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn from_env() -> Config {
        //! Load `.env` if present, then read the variables above. Unset or
        //! unparsable values fall back to the defaults.

        dotenvy::dotenv().ok();

        let store = env::var(STORE_DIR_VAR)
            .map(StoreConfig::at)
            .unwrap_or_default();

        let level = env::var(LOG_LEVEL_VAR)
            .ok()
            .and_then(|level| level.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);

        Config {
            store,
            log: LogConfig { level },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_path_uses_name_and_extension() {
        let store = StoreConfig::at("/tmp/relations");
        assert_eq!(
            store.path_for("movie"),
            PathBuf::from("/tmp/relations/movie.dbf")
        );
    }

    #[test]
    fn defaults_point_at_store_directory() {
        let config = Config::default();
        assert_eq!(config.store.directory, PathBuf::from("store"));
        assert_eq!(config.log.level, LevelFilter::Info);
    }
}

//! Whole-table snapshots.
//!
//! A snapshot is a JSON document with its fields in a fixed order: name,
//! save time, schema, key, tuple count, then the tuples. The key index is
//! never written; loading re-inserts every tuple, which rebuilds the index
//! and checks the stored values against the stored schema.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use serde::{Deserialize, Serialize};

use super::schema::Schema;
use super::table::Table;
use super::tuple::Tuple;
use crate::config::StoreConfig;
use crate::error::RelationError;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    name: String,
    saved_at: String,
    schema: Schema,
    key: Vec<String>,
    tuple_count: usize,
    tuples: Vec<Tuple>,
}

fn persistence_error(path: &Path, reason: String) -> RelationError {
    RelationError::Persistence {
        path: path.to_path_buf(),
        reason,
    }
}

impl Table {
    pub fn save(&self, store: &StoreConfig) -> Result<PathBuf, RelationError> {
        //! Write the whole table to `<store>/<name>.dbf`, replacing any
        //! earlier snapshot of the same name.
        //!
        //! Returns the path written.

        let path = store.path_for(self.name());
        info!("save: {} -> {}", self.name(), path.display());

        fs::create_dir_all(&store.directory)
            .map_err(|e| persistence_error(&store.directory, e.to_string()))?;

        let saved_at: DateTime<Local> = Local::now();
        let snapshot = Snapshot {
            name: self.name().to_string(),
            saved_at: saved_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            schema: self.schema().clone(),
            key: self.key().to_vec(),
            tuple_count: self.len(),
            tuples: self.tuples().to_vec(),
        };

        let file = File::create(&path).map_err(|e| persistence_error(&path, e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)
            .map_err(|e| persistence_error(&path, e.to_string()))?;
        writer
            .flush()
            .map_err(|e| persistence_error(&path, e.to_string()))?;

        Ok(path)
    }

    pub fn load(name: &str, store: &StoreConfig) -> Result<Table, RelationError> {
        //! Rebuild the table saved under `name`.
        //!
        //! A missing snapshot is [`RelationError::NotFound`]; an unreadable or
        //! malformed one is [`RelationError::Persistence`]. Never returns an
        //! empty stand-in table.

        let path = store.path_for(name);
        info!("load: {} <- {}", name, path.display());

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RelationError::NotFound {
                    name: name.to_string(),
                    path,
                });
            }
            Err(e) => return Err(persistence_error(&path, e.to_string())),
        };

        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| persistence_error(&path, e.to_string()))?;

        if snapshot.tuple_count != snapshot.tuples.len() {
            return Err(persistence_error(
                &path,
                format!(
                    "tuple count {} does not match {} stored tuple(s)",
                    snapshot.tuple_count,
                    snapshot.tuples.len()
                ),
            ));
        }

        let mut table = Table::from_parts(snapshot.name, snapshot.schema, snapshot.key)
            .map_err(|e| persistence_error(&path, e.to_string()))?;
        table
            .insert_many(snapshot.tuples)
            .map_err(|e| persistence_error(&path, e.to_string()))?;

        Ok(table)
    }
}

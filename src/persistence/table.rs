use std::fmt::{Display, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};

use super::index::{KeyIndex, KeyValue};
use super::schema::Schema;
use super::tuple::Tuple;
use crate::error::RelationError;

/// Width of a single column when a table is printed.
const COLUMN_WIDTH: usize = 15;

/// Process-wide counter used to name derived tables (`name + count`).
static TEMP_TABLE_COUNT: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn next_table_name(base: &str) -> String {
    //! Name a derived table after its source, with a counter suffix that is
    //! never handed out twice in a process.

    let count = TEMP_TABLE_COUNT.fetch_add(1, Ordering::Relaxed);
    format!("{}{}", base, count)
}

/// A relation: a named, typed schema with a primary key and an
/// insertion-ordered list of tuples.
///
/// Rows can be duplicated by value. The key index only tracks the most
/// recent row for each key, so a key inserted twice shows up twice in
/// [`Table::tuples`] but once in the index.
///
/// Operators never change an existing table; they read it and return a new
/// one, see [`super::operators`].
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    schema: Schema,
    key: Vec<String>,
    key_positions: Vec<usize>,
    tuples: Vec<Tuple>,
    index: KeyIndex,
}

impl Table {
    pub fn new(name: &str, attributes: &str, domains: &str, key: &str) -> Result<Table, RelationError> {
        //! Create an empty table from the space-separated definition, e.g.
        //!
        //! `Table::new("studio", "name address presNo", "String String Integer", "name")`

        let schema = Schema::parse(attributes, domains)?;
        let key = key.split_whitespace().map(String::from).collect();
        let table = Table::from_parts(name.to_string(), schema, key)?;

        info!("DDL> create table {} ({})", name, attributes);
        Ok(table)
    }

    pub fn from_parts(name: String, schema: Schema, key: Vec<String>) -> Result<Table, RelationError> {
        //! Create an empty table from an already built [`Schema`] and the list
        //! of key attribute names.

        if key.is_empty() {
            return Err(RelationError::InvalidDefinition(format!(
                "table {} has no key",
                name
            )));
        }

        let key_positions = key
            .iter()
            .map(|attribute| {
                schema
                    .position(attribute)
                    .ok_or_else(|| RelationError::AttributeNotFound {
                        table: name.clone(),
                        attribute: attribute.clone(),
                    })
            })
            .collect::<Result<Vec<usize>, RelationError>>()?;

        Ok(Table {
            name,
            schema,
            key,
            key_positions,
            tuples: Vec::new(),
            index: KeyIndex::new(),
        })
    }

    pub(crate) fn derived(
        &self,
        schema: Schema,
        key: Vec<String>,
        tuples: Vec<Tuple>,
    ) -> Result<Table, RelationError> {
        //! Build a new table named after this one from rows that already
        //! conform to `schema`. The index is built from the rows.

        let mut table = Table::from_parts(next_table_name(&self.name), schema, key)?;
        for tuple in tuples {
            table.push(tuple);
        }
        Ok(table)
    }

    pub(crate) fn derived_like(&self, tuples: Vec<Tuple>) -> Table {
        //! A new table with this table's schema and key, holding `tuples`.

        let mut table = Table {
            name: next_table_name(&self.name),
            schema: self.schema.clone(),
            key: self.key.clone(),
            key_positions: self.key_positions.clone(),
            tuples: Vec::with_capacity(tuples.len()),
            index: KeyIndex::new(),
        };
        for tuple in tuples {
            table.push(tuple);
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn key(&self) -> &[String] {
        &self.key
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn index_len(&self) -> usize {
        //! Number of distinct keys in the index. Smaller than [`Table::len`]
        //! when a key was inserted more than once.

        self.index.len()
    }

    pub fn col(&self, attribute: &str) -> Option<usize> {
        //! Column position of `attribute`, for writing predicates.

        self.schema.position(attribute)
    }

    pub fn key_of(&self, tuple: &Tuple) -> KeyValue {
        KeyValue::of(tuple, &self.key_positions)
    }

    pub fn insert(&mut self, tuple: Tuple) -> Result<(), RelationError> {
        //! Insert a tuple after checking its arity and that every value has
        //! exactly the declared domain of its column.
        //!
        //! A rejected tuple leaves the table untouched.

        info!("DML> insert into {} values ( {} )", self.name, tuple);

        if let Err(error) = self.type_check(&tuple) {
            warn!("{}", error);
            return Err(error);
        }

        self.push(tuple);
        Ok(())
    }

    pub fn insert_many(&mut self, rows: Vec<Tuple>) -> Result<usize, RelationError> {
        //! Bulk insert, built on [`Table::insert`].
        //!
        //! Returns the number of inserted rows. This is not atomic: rows
        //! inserted before a rejected one stay in the table.

        let mut n_insertions = 0;

        for row in rows {
            self.insert(row)?;
            n_insertions += 1;
        }

        Ok(n_insertions)
    }

    fn type_check(&self, tuple: &Tuple) -> Result<(), RelationError> {
        if tuple.len() != self.schema.len() {
            return Err(RelationError::type_mismatch(
                &self.name,
                format!(
                    "tuple size {} does not match {} attribute(s)",
                    tuple.len(),
                    self.schema.len()
                ),
            ));
        }

        for (value, (attribute, domain)) in tuple.values().iter().zip(self.schema.iter()) {
            if value.domain() != *domain {
                return Err(RelationError::type_mismatch(
                    &self.name,
                    format!(
                        "invalid value {}: expected {} for {}, found {}",
                        value,
                        domain,
                        attribute,
                        value.domain()
                    ),
                ));
            }
        }

        Ok(())
    }

    fn push(&mut self, tuple: Tuple) {
        let key = self.key_of(&tuple);
        let row_index = self.tuples.len();
        self.tuples.push(tuple);

        if let Some(previous) = self.index.insert(key, row_index) {
            debug!(
                "index on {}: row {} replaces row {} for {}",
                self.name,
                row_index,
                previous,
                self.key_of(&self.tuples[row_index])
            );
        }
    }

    pub(crate) fn lookup(&self, key: &KeyValue) -> Vec<Tuple> {
        self.index
            .lookup(key)
            .map(|row_index| self.tuples[row_index].clone())
            .collect()
    }

    pub fn index_dump(&self) -> String {
        //! The index listing, in key order: one `key -> tuple` line per entry.

        let mut dump = String::new();
        let rule = "-".repeat(19);

        let _ = writeln!(dump, "\n Index for {}", self.name);
        let _ = writeln!(dump, "{}", rule);
        for (key, row_index) in self.index.iter() {
            let _ = writeln!(dump, "{} -> {}", key, self.tuples[row_index]);
        }
        let _ = writeln!(dump, "{}", rule);

        dump
    }

    pub fn print(&self) {
        print!("{}", self);
    }

    pub fn print_index(&self) {
        print!("{}", self.index_dump());
    }
}

impl PartialEq for Table {
    /// Tables are equal when schema, key and tuple list agree; the name and
    /// the index (derived from the tuples) are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.key == other.key && self.tuples == other.tuples
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let border = format!("|-{}-|", "-".repeat(COLUMN_WIDTH * self.schema.len()));
        let line = |cells: Vec<String>| -> String {
            let cells: String = cells
                .iter()
                .map(|cell| format!("{:>width$}", cell, width = COLUMN_WIDTH))
                .collect();
            format!("| {} |", cells)
        };

        writeln!(f, "\n Table {}", self.name)?;
        writeln!(f, "{}", border)?;
        writeln!(f, "{}", line(self.schema.names().cloned().collect()))?;
        writeln!(f, "{}", border)?;
        for tuple in &self.tuples {
            writeln!(
                f,
                "{}",
                line(tuple.values().iter().map(|value| value.to_string()).collect())
            )?;
        }
        writeln!(f, "{}", border)
    }
}

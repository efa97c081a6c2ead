//! Tables need the following components
//! - Schema (ordered mapping of attribute names to domains)
//! - Tuple (a row of typed values, checked against a Schema on insert)
//! - KeyValue (the key attributes of a tuple, ordered, used by the index)
//! - Table (schema, key, rows and the key index)
//! - Operators (project, select, union, minus, join over tables)
//! - Snapshot (saving and loading whole tables)
//!

//  All modules of this lib
mod index;
mod operators;
mod schema;
mod snapshot;
mod table;
mod tuple;

//  External API
pub use index::KeyValue;
pub use schema::{DomainType, Schema};
pub use table::Table;
pub use tuple::{Tuple, Value};

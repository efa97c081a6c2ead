//! An in-memory relational table engine.
//!
//! A [`persistence::Table`] holds a typed schema, a primary key and its rows,
//! and supports the five classic relational algebra operators: project,
//! select, union, minus and join. Tables can be saved to and loaded from
//! snapshot files.

pub mod cli;
pub mod config;
pub mod error;
pub mod persistence;

pub use error::RelationError;

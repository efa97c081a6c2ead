//! Every failure the engine can report.
//!
//! Operators never mutate their inputs, so an error always means the
//! operation produced nothing and the source table is exactly as it was.

use std::path::PathBuf;

use crate::persistence::DomainType;

#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    /// A tuple disagrees with the schema in arity or in a value's domain.
    #[error("type mismatch on {table}: {reason}")]
    TypeMismatch { table: String, reason: String },

    /// Union or minus on tables that differ in arity or positional domains.
    #[error("incompatible tables {left} and {right}: {reason}")]
    Compatibility {
        left: String,
        right: String,
        reason: String,
    },

    #[error("invalid attribute {attribute}: does not exist in {table}")]
    AttributeNotFound { table: String, attribute: String },

    #[error("invalid join: {left} attribute(s) on the left but {right} on the right")]
    JoinArity { left: usize, right: usize },

    #[error("invalid table definition: {0}")]
    InvalidDefinition(String),

    /// No snapshot exists for the table name.
    #[error("does not exist: table {name} at {}", .path.display())]
    NotFound { name: String, path: PathBuf },

    /// The snapshot exists but could not be written or read back.
    #[error("snapshot {}: {reason}", .path.display())]
    Persistence { path: PathBuf, reason: String },
}

impl RelationError {
    pub(crate) fn type_mismatch(table: &str, reason: String) -> RelationError {
        RelationError::TypeMismatch {
            table: table.to_string(),
            reason,
        }
    }

    pub(crate) fn incompatible(left: &str, right: &str, reason: String) -> RelationError {
        RelationError::Compatibility {
            left: left.to_string(),
            right: right.to_string(),
            reason,
        }
    }

    pub(crate) fn domain_disagreement(
        position: usize,
        left: DomainType,
        right: DomainType,
    ) -> String {
        format!("tables disagree on domain {} ({} vs {})", position, left, right)
    }
}

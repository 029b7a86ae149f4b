//! Database error types.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// `NotFound` is reserved for mutation paths (update/close/soft-delete of a
/// missing row); point lookups return `Ok(None)` instead so an absent entity
/// is never conflated with a failure.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Underlying SQLx failure (connection, query, transaction).
    #[error("storage error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A mutation targeted a row that does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// An insert collided with an existing primary key.
    #[error("{entity} {id} already exists")]
    AlreadyExists { entity: &'static str, id: String },
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;

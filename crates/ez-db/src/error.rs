//! Database error types for ez-db.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or a row could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a row but none was returned (lookup by id misses).
    #[error("No result returned")]
    NoResult,

    /// The requested change is not allowed from the current state
    /// (illegal task status transition).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Template seed file could not be read or parsed.
    #[error("Template seed error: {0}")]
    Seed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

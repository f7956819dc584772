//! Storage error types

use thiserror::Error;

/// Failure reported by the storage collaborator.
///
/// Absent rows are not errors: fetches return `Ok(None)` or an empty list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Store could not be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Query failed
    #[error("Query failed: {0}")]
    Query(String),

    /// Row could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::Unavailable(e.to_string())
            }
            other => StorageError::Query(other.to_string()),
        }
    }
}

/// Storage layer for persisting tracker state
///
/// All state lives in a flat string-keyed store of JSON documents. This
/// module defines the store interface, the SQLite-backed implementation,
/// and the typed Repository the rest of the crate goes through.

pub mod sqlite;
pub mod repository;

// Re-export the main storage types
pub use sqlite::*;
pub use repository::*;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Flat string-keyed document store
///
/// The contract the tracker needs from the platform: get/set JSON blobs by
/// key and wipe everything. Read failures are recoverable (callers fall back
/// to empty documents); only writes surface errors.
pub trait KvStore {
    /// Fetch the raw document stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous document
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove every stored document
    fn clear(&self) -> Result<(), StorageError>;
}

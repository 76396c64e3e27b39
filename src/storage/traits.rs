//! Storage traits and error types
//!
//! This module defines the trait interface for movie document stores and
//! associated error types.

use crate::movie::MovieRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A collection of movie documents keyed by movie name
pub trait MovieStore {
    /// Upserts a movie using its name as the match filter
    ///
    /// When a document with the same name exists every field is replaced with
    /// the fields of `record`; otherwise `record` is inserted. Each call is
    /// atomic on its own.
    fn save_movie(&mut self, record: &MovieRecord) -> StorageResult<()>;

    /// Gets the stored movie with the given name
    fn get_movie(&self, name: &str) -> StorageResult<Option<MovieRecord>>;

    /// Counts stored movies
    fn count_movies(&self) -> StorageResult<u64>;

    /// Lists all stored movies ordered by name
    fn list_movies(&self) -> StorageResult<Vec<MovieRecord>>;
}

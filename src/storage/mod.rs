//! Storage module for persisting scraped movies
//!
//! Movies live in a document collection keyed by movie name. The backing
//! store is one SQLite file per database, opened once per page job so every
//! worker holds its own connection.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::{database_path, SqliteStorage};
pub use traits::{MovieStore, StorageError, StorageResult};

use crate::config::StorageConfig;

/// Opens the configured document store
///
/// # Arguments
///
/// * `config` - Data directory, database and collection to use
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Handle bound to the configured collection
/// * `Err(StorageError)` - Failed to create the directory or open the database
pub fn open_storage(config: &StorageConfig) -> StorageResult<SqliteStorage> {
    SqliteStorage::open(config)
}

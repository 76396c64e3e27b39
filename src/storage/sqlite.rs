//! SQLite storage implementation
//!
//! This module provides a SQLite-backed implementation of the MovieStore trait.

use crate::config::StorageConfig;
use crate::movie::MovieRecord;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{MovieStore, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a writer waits for another worker's lock on the same file
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// SQLite storage backend bound to one collection
pub struct SqliteStorage {
    conn: Connection,
    collection: String,
}

impl SqliteStorage {
    /// Opens the database described by `config`, creating the data directory
    /// and schema when missing
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        Self::new(&database_path(config), &config.collection)
    }

    /// Opens a database file and binds it to `collection`
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `collection` - Collection every read and write is scoped to
    pub fn new(path: &Path, collection: &str) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        // Several page workers write the same file concurrently
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn,
            collection: collection.to_string(),
        })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory(collection: &str) -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn,
            collection: collection.to_string(),
        })
    }

    /// Collection this handle reads and writes
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl MovieStore for SqliteStorage {
    fn save_movie(&mut self, record: &MovieRecord) -> StorageResult<()> {
        let document = serde_json::to_string(record)?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO documents (collection, name, document, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(collection, name) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at",
            params![self.collection, record.name, document, now],
        )?;

        Ok(())
    }

    fn get_movie(&self, name: &str) -> StorageResult<Option<MovieRecord>> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM documents WHERE collection = ?1 AND name = ?2",
                params![self.collection, name],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn count_movies(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![self.collection],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn list_movies(&self) -> StorageResult<Vec<MovieRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT document FROM documents WHERE collection = ?1 ORDER BY name")?;

        let documents = stmt
            .query_map(params![self.collection], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut movies = Vec::with_capacity(documents.len());
        for json in documents {
            movies.push(serde_json::from_str(&json)?);
        }

        Ok(movies)
    }
}

/// File backing the configured database
pub fn database_path(config: &StorageConfig) -> PathBuf {
    Path::new(&config.data_dir).join(format!("{}.db", config.database))
}

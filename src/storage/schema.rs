//! Database schema definitions
//!
//! Movies are stored as JSON documents, one row per `(collection, name)`.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One document per movie name within a collection
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    name TEXT NOT NULL,
    document TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (collection, name)
);

CREATE INDEX IF NOT EXISTS idx_documents_updated ON documents(collection, updated_at);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

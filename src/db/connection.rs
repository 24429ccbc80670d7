use rusqlite::Connection;
use std::path::Path;
use anyhow::{Context, Result};
use crate::db::schema;

/// Database connection manager
pub struct DbConnection;

impl DbConnection {
    /// Open (or create) the database at `db_path`
    pub fn open(db_path: &Path) -> Result<Connection> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

        schema::initialize(&conn)
            .context("Failed to initialize database schema")?;

        log::debug!("opened database {}", db_path.display());
        Ok(conn)
    }

    /// Connect to an in-memory database (for testing)
    pub fn connect_in_memory() -> Result<Connection> {
        let conn = Connection::open_in_memory()
            .context("Failed to open in-memory database")?;

        schema::initialize(&conn)
            .context("Failed to initialize database schema")?;

        Ok(conn)
    }
}

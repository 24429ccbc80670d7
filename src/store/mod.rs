//! Persistent storage collaborator.
//!
//! The task set is the entire persisted state: read wholesale when a
//! session opens, written wholesale after every mutation.

use crate::error::StoreError;
use crate::models::Task;
use crate::repo::TaskRepo;
use rusqlite::Connection;

pub trait TaskStore {
    fn load_all(&self) -> Result<Vec<Task>, StoreError>;
    fn save_all(&mut self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wrap a connection whose schema is already initialized
    /// (see `DbConnection::open`)
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl TaskStore for SqliteStore {
    fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        TaskRepo::load_all(&self.conn)
    }

    fn save_all(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        TaskRepo::replace_all(&self.conn, tasks)
    }
}

/// In-memory store keeping the collection as a serialized JSON blob,
/// the way a browser key-value store would
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blob: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing serialized collection
    pub fn from_json(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            saves: 0,
        }
    }

    pub fn as_json(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of completed `save_all` calls
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl TaskStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        match &self.blob {
            Some(blob) => Ok(serde_json::from_str(blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_all(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        self.blob = Some(serde_json::to_string(tasks)?);
        self.saves += 1;
        Ok(())
    }
}

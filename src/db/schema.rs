use rusqlite::{Connection, Result};

/// Create the tasks table if it is missing
///
/// The whole collection is rewritten on every save, so there is a single
/// table and no schema version bookkeeping. `position` keeps insertion order.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            remaining_minutes INTEGER NOT NULL,
            user_priority TEXT NULL,
            deadline TEXT NULL,
            created_at TEXT NOT NULL,
            position INTEGER NOT NULL
        )",
        [],
    )?;
    Ok(())
}

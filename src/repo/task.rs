use rusqlite::{Connection, Row};
use crate::error::StoreError;
use crate::models::{stored_minutes, stored_name, PriorityLevel, Task, TaskId};
use chrono::{DateTime, SecondsFormat, Utc};

/// Task repository: wholesale reads and writes of the tasks table
pub struct TaskRepo;

impl TaskRepo {
    /// Load every task in insertion order
    pub fn load_all(conn: &Connection) -> Result<Vec<Task>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT id, name, remaining_minutes, user_priority, deadline, created_at
             FROM tasks ORDER BY position"
        )?;

        let rows = stmt.query_map([], Self::row_to_task)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        log::debug!("loaded {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Replace the table contents with `tasks` in one transaction
    pub fn replace_all(conn: &Connection, tasks: &[Task]) -> Result<(), StoreError> {
        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (id, name, remaining_minutes, user_priority, deadline, created_at, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            )?;
            for (position, task) in tasks.iter().enumerate() {
                stmt.execute(rusqlite::params![
                    task.id.as_str(),
                    task.name,
                    task.remaining_minutes,
                    task.user_priority.map(|p| p.as_str()),
                    task.deadline.map(format_ts),
                    format_ts(task.created_at),
                    position as i64,
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("saved {} tasks", tasks.len());
        Ok(())
    }

    fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
        let id: String = row.get(0)?;

        let remaining_minutes = stored_minutes(row.get(2)?);

        let user_priority = row.get::<_, Option<String>>(3)?.and_then(|raw| {
            let parsed = PriorityLevel::from_str(&raw);
            if parsed.is_none() {
                log::warn!("task {}: unrecognized priority '{}' treated as absent", id, raw);
            }
            parsed
        });

        let deadline = row.get::<_, Option<String>>(4)?.and_then(|raw| {
            let parsed = parse_ts(&raw);
            if parsed.is_none() {
                log::warn!("task {}: unreadable deadline '{}' treated as absent", id, raw);
            }
            parsed
        });

        let created_raw: String = row.get(5)?;
        let created_at = parse_ts(&created_raw).unwrap_or_else(|| {
            log::warn!("task {}: unreadable creation time '{}'", id, created_raw);
            DateTime::<Utc>::UNIX_EPOCH
        });

        Ok(Task {
            id: TaskId::from(id),
            name: stored_name(row.get(1)?),
            remaining_minutes,
            user_priority,
            deadline,
            created_at,
        })
    }
}

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_ts(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Priority level, used both for the user's hint and the effective priority
///
/// Ordering follows urgency: `Low < Medium < High < VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 4] = [
        PriorityLevel::VeryHigh,
        PriorityLevel::High,
        PriorityLevel::Medium,
        PriorityLevel::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::VeryHigh => "very-high",
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
        }
    }

    /// Parse a priority name; unrecognized values yield `None`
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "very-high" | "very_high" | "veryhigh" | "v" => Some(PriorityLevel::VeryHigh),
            "high" | "h" => Some(PriorityLevel::High),
            "medium" | "m" => Some(PriorityLevel::Medium),
            "low" | "l" => Some(PriorityLevel::Low),
            _ => None,
        }
    }

    /// Ranking weight (higher ranks first)
    pub fn weight(&self) -> u8 {
        match self {
            PriorityLevel::VeryHigh => 4,
            PriorityLevel::High => 3,
            PriorityLevel::Medium => 2,
            PriorityLevel::Low => 1,
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque task identifier (UUID v4, lowercase hyphenated)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        TaskId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, enough to address a task from the command line
    pub fn short(&self) -> &str {
        let end = self.0.char_indices().nth(8).map(|(i, _)| i).unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task model
///
/// The effective priority is deliberately absent: it depends on the
/// current time and is derived by `engine::effective_priority` on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(deserialize_with = "lenient_minutes")]
    pub remaining_minutes: u32,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub user_priority: Option<PriorityLevel>,
    #[serde(default, deserialize_with = "lenient_deadline")]
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task with a fresh id
    pub fn new(name: String, remaining_minutes: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::generate(),
            name,
            remaining_minutes,
            user_priority: None,
            deadline: None,
            created_at,
        }
    }
}

/// Name given to a stored task whose name is blank
pub const UNNAMED: &str = "(unnamed)";

/// Stored name, with a blank one replaced by `UNNAMED`
pub fn stored_name(raw: String) -> String {
    if raw.trim().is_empty() {
        log::warn!("blank stored task name, using '{}'", UNNAMED);
        UNNAMED.to_string()
    } else {
        raw
    }
}

/// Stored remaining time, with anything outside 1..=u32::MAX read as 1
pub fn stored_minutes(raw: i64) -> u32 {
    u32::try_from(raw).ok().filter(|m| *m > 0).unwrap_or_else(|| {
        log::warn!("stored remaining time {} out of range, using 1", raw);
        1
    })
}

// Stored records may carry values this version does not understand;
// those read back as "absent" (or the nearest valid value) rather than
// failing the whole load.

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(stored_name(String::deserialize(deserializer)?))
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    // Non-integers and values beyond i64 fall to 0 and are repaired
    Ok(stored_minutes(raw.as_i64().unwrap_or(0)))
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<PriorityLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(PriorityLevel::from_str))
}

fn lenient_deadline<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// Input for creating a task
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub name: String,
    pub remaining_minutes: i64,
    pub user_priority: Option<PriorityLevel>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial update for an existing task
///
/// `None` leaves a field untouched. The nested options on `user_priority`
/// and `deadline` distinguish "leave alone" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub name: Option<String>,
    pub remaining_minutes: Option<i64>,
    pub user_priority: Option<Option<PriorityLevel>>,
    pub deadline: Option<Option<DateTime<Utc>>>,
}

impl TaskEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.remaining_minutes.is_none()
            && self.user_priority.is_none()
            && self.deadline.is_none()
    }
}

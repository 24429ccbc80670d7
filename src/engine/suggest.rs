// Suggestion selector: pick one task to work on right now

use crate::engine::ranking::{rank, RankedTask};
use crate::error::{InputError, Result};
use crate::models::Task;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// How the selector treats the available time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestMode {
    /// Highest-ranked task that fits in the available time
    Finishable,
    /// Highest-ranked task, whether or not it fits
    Strategic,
}

impl SuggestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestMode::Finishable => "finishable",
            SuggestMode::Strategic => "strategic",
        }
    }
}

impl FromStr for SuggestMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finishable" | "finish" | "fit" => Ok(SuggestMode::Finishable),
            "strategic" | "strategy" | "top" => Ok(SuggestMode::Strategic),
            _ => Err(InputError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for SuggestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommend a task given `available_minutes` of free time
///
/// Returns `Ok(None)` when there is nothing to suggest: an empty task list,
/// or in finishable mode no task short enough. A non-positive budget is
/// rejected even in strategic mode, where the budget is otherwise unused.
pub fn suggest(
    tasks: &[Task],
    now: DateTime<Utc>,
    available_minutes: i64,
    mode: SuggestMode,
) -> Result<Option<RankedTask<'_>>> {
    if available_minutes <= 0 {
        return Err(InputError::NonPositiveBudget(available_minutes).into());
    }

    let ranked = rank(tasks, now);
    let pick = match mode {
        SuggestMode::Finishable => ranked
            .into_iter()
            .find(|r| i64::from(r.task.remaining_minutes) <= available_minutes),
        SuggestMode::Strategic => ranked.into_iter().next(),
    };

    log::debug!(
        "suggest mode={} budget={}min -> {}",
        mode,
        available_minutes,
        pick.map(|r| r.task.id.short().to_string()).unwrap_or_else(|| "none".to_string())
    );
    Ok(pick)
}

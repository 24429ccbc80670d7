// Ranking: a total order over tasks built from effective priority

use crate::engine::priority::effective_priority;
use crate::models::{PriorityLevel, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// A task paired with the effective priority it had when ranked
///
/// Borrowed view; ranking never touches the stored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedTask<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub priority: PriorityLevel,
}

impl<'a> RankedTask<'a> {
    pub fn at(task: &'a Task, now: DateTime<Utc>) -> Self {
        Self {
            task,
            priority: effective_priority(task, now),
        }
    }

    /// True when the deadline has moved the priority away from the user's hint
    pub fn is_elevated(&self) -> bool {
        self.task.user_priority.unwrap_or(PriorityLevel::Low) != self.priority
    }
}

/// Compare two ranked tasks; `Less` means "comes first"
///
/// Keys, in order:
/// 1. priority weight, descending
/// 2. tasks with a deadline before tasks without; earlier deadline first
/// 3. when neither has a deadline, shorter remaining time first
/// 4. earlier creation first
/// 5. id, so no two distinct tasks ever compare equal
pub fn compare(a: &RankedTask<'_>, b: &RankedTask<'_>) -> Ordering {
    b.priority
        .weight()
        .cmp(&a.priority.weight())
        .then_with(|| match (a.task.deadline, b.task.deadline) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.task.remaining_minutes.cmp(&b.task.remaining_minutes),
        })
        .then_with(|| a.task.created_at.cmp(&b.task.created_at))
        .then_with(|| a.task.id.cmp(&b.task.id))
}

/// Rank tasks at `now`, highest first
///
/// Effective priority is recomputed for every task before sorting.
pub fn rank(tasks: &[Task], now: DateTime<Utc>) -> Vec<RankedTask<'_>> {
    let mut ranked: Vec<RankedTask<'_>> = tasks.iter().map(|t| RankedTask::at(t, now)).collect();
    ranked.sort_by(compare);
    log::debug!("ranked {} tasks", ranked.len());
    ranked
}

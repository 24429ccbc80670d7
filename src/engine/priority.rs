// Effective priority: the level actually used for ranking and suggestions

use crate::models::{PriorityLevel, Task};
use chrono::{DateTime, Duration, Utc};

/// Deadlines at or inside this window force `High`
pub const HIGH_WINDOW_HOURS: i64 = 24;

/// Deadlines inside this window (but past the high window) force `Medium`
pub const MEDIUM_WINDOW_HOURS: i64 = 72;

/// Derive the effective priority of a task at `now`
///
/// First matching rule wins:
/// 1. A `VeryHigh` user priority is final, whatever the deadline says.
/// 2. A deadline at most 24h away is `High`. Overdue deadlines count as
///    inside the window, so lateness saturates at `High`.
/// 3. A deadline at most 72h away is `Medium`.
/// 4. Otherwise the user priority, or `Low` when there is none.
///
/// Pure function of its arguments.
pub fn effective_priority(task: &Task, now: DateTime<Utc>) -> PriorityLevel {
    if task.user_priority == Some(PriorityLevel::VeryHigh) {
        return PriorityLevel::VeryHigh;
    }

    if let Some(deadline) = task.deadline {
        let until = deadline - now;
        if until <= Duration::hours(HIGH_WINDOW_HOURS) {
            return PriorityLevel::High;
        }
        if until <= Duration::hours(MEDIUM_WINDOW_HOURS) {
            return PriorityLevel::Medium;
        }
    }

    task.user_priority.unwrap_or(PriorityLevel::Low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
    }

    fn task(user_priority: Option<PriorityLevel>, deadline: Option<DateTime<Utc>>) -> Task {
        let mut task = Task::new("t".to_string(), 30, now() - Duration::days(1));
        task.user_priority = user_priority;
        task.deadline = deadline;
        task
    }

    #[test]
    fn test_very_high_overrides_any_deadline() {
        let deadlines = [
            None,
            Some(now() - Duration::hours(5)),
            Some(now() + Duration::hours(30)),
            Some(now() + Duration::days(365)),
        ];
        for deadline in deadlines {
            let t = task(Some(PriorityLevel::VeryHigh), deadline);
            assert_eq!(effective_priority(&t, now()), PriorityLevel::VeryHigh);
        }
    }

    #[test]
    fn test_deadline_exactly_24h_is_high() {
        let t = task(None, Some(now() + Duration::hours(24)));
        assert_eq!(effective_priority(&t, now()), PriorityLevel::High);

        let t = task(None, Some(now() + Duration::hours(24) + Duration::seconds(1)));
        assert_eq!(effective_priority(&t, now()), PriorityLevel::Medium);
    }

    #[test]
    fn test_deadline_exactly_72h_is_medium() {
        let t = task(Some(PriorityLevel::Low), Some(now() + Duration::hours(72)));
        assert_eq!(effective_priority(&t, now()), PriorityLevel::Medium);
    }

    #[test]
    fn test_deadline_past_72h_falls_through() {
        let deadline = Some(now() + Duration::hours(72) + Duration::minutes(1));
        assert_eq!(effective_priority(&task(None, deadline), now()), PriorityLevel::Low);
        assert_eq!(
            effective_priority(&task(Some(PriorityLevel::High), deadline), now()),
            PriorityLevel::High
        );
        assert_eq!(
            effective_priority(&task(Some(PriorityLevel::Medium), deadline), now()),
            PriorityLevel::Medium
        );
    }

    #[test]
    fn test_overdue_saturates_to_high() {
        let t = task(None, Some(now() - Duration::hours(1)));
        assert_eq!(effective_priority(&t, now()), PriorityLevel::High);

        let t = task(Some(PriorityLevel::Low), Some(now() - Duration::days(90)));
        assert_eq!(effective_priority(&t, now()), PriorityLevel::High);
    }

    #[test]
    fn test_close_deadline_can_lower_user_priority() {
        // A medium-window deadline wins even over a higher user hint
        let t = task(Some(PriorityLevel::High), Some(now() + Duration::hours(48)));
        assert_eq!(effective_priority(&t, now()), PriorityLevel::Medium);
    }

    #[test]
    fn test_no_deadline_uses_user_priority_or_low() {
        assert_eq!(effective_priority(&task(None, None), now()), PriorityLevel::Low);
        assert_eq!(
            effective_priority(&task(Some(PriorityLevel::Medium), None), now()),
            PriorityLevel::Medium
        );
    }

    #[test]
    fn test_idempotent_for_same_now() {
        let t = task(Some(PriorityLevel::Medium), Some(now() + Duration::hours(10)));
        let first = effective_priority(&t, now());
        let second = effective_priority(&t, now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_priority_rises_as_time_passes() {
        let t = task(None, Some(now() + Duration::days(5)));
        assert_eq!(effective_priority(&t, now()), PriorityLevel::Low);
        assert_eq!(effective_priority(&t, now() + Duration::days(3)), PriorityLevel::Medium);
        assert_eq!(effective_priority(&t, now() + Duration::days(4)), PriorityLevel::High);
        assert_eq!(effective_priority(&t, now() + Duration::days(6)), PriorityLevel::High);
    }
}

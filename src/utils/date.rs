// Deadline expression parsing

use crate::error::InputError;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Parse a deadline expression relative to `now`
///
/// Supported forms:
/// - RFC 3339: `2026-01-10T14:30:00Z`, `2026-01-10T14:30:00+02:00`
/// - local date and time: `2026-01-10T14:30`, `2026-01-10 14:30`
/// - local date: `2026-01-10` (end of that day)
/// - `today`/`eod`, `tomorrow` (end of day)
/// - relative: `+30m`, `+2h`, `+3d`, `+1w`
pub fn parse_date_expr(expr: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, InputError> {
    let expr = expr.trim();
    let malformed = || InputError::MalformedDeadline(expr.to_string());

    if let Ok(dt) = DateTime::parse_from_rfc3339(expr) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(expr, format) {
            return local_to_utc(&naive).ok_or_else(malformed);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        return end_of_day(date).ok_or_else(malformed);
    }

    if let Some(rest) = expr.strip_prefix('+') {
        return parse_relative(rest, now).ok_or_else(malformed);
    }

    let today = now.with_timezone(&Local).date_naive();
    match expr.to_ascii_lowercase().as_str() {
        "today" | "eod" => end_of_day(today).ok_or_else(malformed),
        "tomorrow" => end_of_day(today + Duration::days(1)).ok_or_else(malformed),
        _ => Err(malformed()),
    }
}

fn local_to_utc(naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(23, 59, 0)?;
    local_to_utc(&date.and_time(time))
}

/// `30m`, `2h`, `3d`, `1w` after `now`
fn parse_relative(rest: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let (unit_at, _) = rest.char_indices().last()?;
    let (amount, unit) = rest.split_at(unit_at);
    let amount: i64 = amount.parse().ok()?;
    if amount < 0 {
        return None;
    }
    let offset = match unit {
        "m" => Duration::try_minutes(amount)?,
        "h" => Duration::try_hours(amount)?,
        "d" => Duration::try_days(amount)?,
        "w" => Duration::try_weeks(amount)?,
        _ => return None,
    };
    now.checked_add_signed(offset)
}

// Duration parsing for remaining-time and available-time inputs

use crate::error::InputError;

/// Parse a duration expression and return whole minutes
///
/// A bare integer is minutes and passes through unchanged, sign included,
/// so positivity is checked by whoever consumes the value. Unit forms
/// combine `d`, `h` and `m` in that order: `45m`, `2h`, `1h30m`, `1d`.
pub fn parse_duration_minutes(expr: &str) -> Result<i64, InputError> {
    let expr = expr.trim();
    if let Ok(minutes) = expr.parse::<i64>() {
        return Ok(minutes);
    }

    let malformed = || InputError::MalformedDuration(expr.to_string());
    if expr.is_empty() {
        return Err(malformed());
    }

    let mut total = 0i64;
    let mut remaining = expr;
    // Units must appear largest first; each at most once
    for (unit, factor) in [('d', 24 * 60), ('h', 60), ('m', 1)] {
        if remaining.is_empty() {
            break;
        }
        if let Some(pos) = remaining.find(unit) {
            let value = remaining[..pos].parse::<i64>().map_err(|_| malformed())?;
            if value < 0 {
                return Err(malformed());
            }
            total = value
                .checked_mul(factor)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(malformed)?;
            remaining = &remaining[pos + 1..];
        }
    }

    if !remaining.is_empty() {
        return Err(malformed());
    }

    Ok(total)
}

// User-facing error text and exit helpers

use crate::error::{Error, InputError};
use std::process;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing tasks, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Message for a core error, phrased for the person at the terminal
pub fn describe(err: &Error) -> String {
    match err {
        Error::InvalidInput(input) => describe_input(input),
        Error::NotFound(id) => format!("Task '{}' not found.", id),
        Error::Storage(e) => format!("Could not access task storage: {}", e),
    }
}

fn describe_input(err: &InputError) -> String {
    match err {
        InputError::EmptyName => "Task name cannot be empty.".to_string(),
        InputError::NonPositiveDuration(m) => {
            format!("Remaining time must be greater than 0 minutes (got {}).", m)
        }
        InputError::NonPositiveBudget(m) => {
            format!("Available time must be greater than 0 minutes (got {}).", m)
        }
        InputError::MalformedDeadline(s) => format!(
            "Invalid deadline '{}'. Use YYYY-MM-DD, YYYY-MM-DDTHH:MM, today, tomorrow, or +N(m|h|d|w).",
            s
        ),
        InputError::MalformedDuration(s) => {
            format!("Invalid duration '{}'. Use minutes (30) or units like 45m, 2h, 1h30m.", s)
        }
        InputError::UnknownMode(s) => {
            format!("Unknown suggestion mode '{}'. Use 'finishable' or 'strategic'.", s)
        }
        InputError::UnknownPriority(s) => {
            format!("Unknown priority '{}'. Use very-high, high, medium, low, or none.", s)
        }
        InputError::AmbiguousId(s) => {
            format!("Task ID '{}' is ambiguous. Use more characters.", s)
        }
    }
}

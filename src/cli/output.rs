// Output formatting utilities

use crate::engine::{RankedTask, SuggestMode};
use crate::models::PriorityLevel;
use chrono::{DateTime, Local, Utc};
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";
const ANSI_FG_BRIGHT_RED: &str = "\x1b[91m";

/// Narrowest the name column is ever squeezed to
const MIN_NAME_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskListOptions {
    pub use_relative_time: bool,
    pub use_color: bool,
    /// Total width available; `None` means no limit
    pub max_width: Option<usize>,
}

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, if stdout is a terminal
///
/// Uses the `terminal_size` crate, with fallback to the COLUMNS
/// environment variable.
pub fn get_terminal_width() -> Option<usize> {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return Some(w as usize);
        }
    }

    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse::<usize>().ok())
        .filter(|w| *w > 0 && *w < 10000)
}

fn priority_color(level: PriorityLevel) -> &'static str {
    match level {
        PriorityLevel::VeryHigh => ANSI_FG_BRIGHT_RED,
        PriorityLevel::High => ANSI_FG_RED,
        PriorityLevel::Medium => ANSI_FG_YELLOW,
        PriorityLevel::Low => ANSI_FG_BRIGHT_BLACK,
    }
}

/// Wrap already-padded text in the priority's color
fn colorize_priority(text: &str, level: PriorityLevel, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    if level == PriorityLevel::VeryHigh {
        format!("{}{}{}{}", ANSI_BOLD, priority_color(level), text, ANSI_RESET)
    } else {
        format!("{}{}{}", priority_color(level), text, ANSI_RESET)
    }
}

/// Format remaining minutes: `45m`, `2h`, `1h30m`
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h{}m", h, m),
    }
}

/// Format an absolute timestamp in local time
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format a deadline relative to `now`: `in 3h`, `in 2d`, `40m ago`
pub fn format_relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = ts - now;
    let mins = delta.num_minutes();
    let abs = mins.abs();

    let amount = if abs < 60 {
        format!("{}m", abs)
    } else if abs < 48 * 60 {
        format!("{}h", abs / 60)
    } else {
        format!("{}d", abs / (24 * 60))
    };

    if mins < 0 {
        format!("{} ago", amount)
    } else {
        format!("in {}", amount)
    }
}

fn format_deadline(ranked: &RankedTask<'_>, now: DateTime<Utc>, relative: bool) -> String {
    match ranked.task.deadline {
        Some(deadline) if relative => format_relative(deadline, now),
        Some(deadline) => format_timestamp(deadline),
        None => String::new(),
    }
}

/// Priority cell text; `*` marks a priority raised or lowered by the deadline
fn priority_label(ranked: &RankedTask<'_>) -> String {
    if ranked.is_elevated() {
        format!("{}*", ranked.priority)
    } else {
        ranked.priority.to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Format ranked tasks as a table
pub fn format_task_list_table(ranked: &[RankedTask<'_>], now: DateTime<Utc>, options: &TaskListOptions) -> String {
    if ranked.is_empty() {
        return "No tasks.\n".to_string();
    }

    let rows: Vec<[String; 5]> = ranked
        .iter()
        .map(|r| {
            [
                r.task.id.short().to_string(),
                r.task.name.clone(),
                format_minutes(r.task.remaining_minutes),
                priority_label(r),
                format_deadline(r, now, options.use_relative_time),
            ]
        })
        .collect();

    let headers = ["ID", "Name", "Time", "Priority", "Deadline"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    // Squeeze the name column to fit the terminal
    if let Some(max_width) = options.max_width {
        let others: usize = widths.iter().enumerate().filter(|(i, _)| *i != 1).map(|(_, w)| w + 1).sum();
        let available = max_width.saturating_sub(others).max(MIN_NAME_WIDTH);
        widths[1] = widths[1].min(available);
    }

    let mut output = String::new();
    let header_line = format!(
        "{:<w0$} {:<w1$} {:>w2$} {:<w3$} {}",
        headers[0], headers[1], headers[2], headers[3], headers[4],
        w0 = widths[0], w1 = widths[1], w2 = widths[2], w3 = widths[3],
    );
    output.push_str(header_line.trim_end());
    output.push('\n');
    output.push_str(&"-".repeat(widths.iter().sum::<usize>() + 4));
    output.push('\n');

    for (row, r) in rows.iter().zip(ranked) {
        let priority = colorize_priority(&format!("{:<w$}", row[3], w = widths[3]), r.priority, options.use_color);
        let line = format!(
            "{:<w0$} {:<w1$} {:>w2$} {} {}",
            row[0],
            truncate(&row[1], widths[1]),
            row[2],
            priority,
            row[4],
            w0 = widths[0], w1 = widths[1], w2 = widths[2],
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Format a detailed view of one task
pub fn format_task_summary(ranked: &RankedTask<'_>, now: DateTime<Utc>, options: &TaskListOptions) -> String {
    let task = ranked.task;
    let mut output = String::new();

    let header = format!("Task {}: {}", task.id.short(), task.name);
    output.push_str(&header);
    output.push('\n');
    output.push_str(&"=".repeat(header.chars().count().max(40)));
    output.push_str("\n\n");

    output.push_str(&format!("  ID:          {}\n", task.id));
    output.push_str(&format!("  Name:        {}\n", task.name));
    output.push_str(&format!("  Remaining:   {}\n", format_minutes(task.remaining_minutes)));
    match task.user_priority {
        Some(p) => output.push_str(&format!("  Priority:    {}\n", p)),
        None => output.push_str("  Priority:    (none)\n"),
    }
    output.push_str(&format!(
        "  Effective:   {}\n",
        colorize_priority(ranked.priority.as_str(), ranked.priority, options.use_color)
    ));
    match task.deadline {
        Some(deadline) => output.push_str(&format!(
            "  Deadline:    {} ({})\n",
            format_timestamp(deadline),
            format_relative(deadline, now)
        )),
        None => output.push_str("  Deadline:    (none)\n"),
    }
    output.push_str(&format!("  Created:     {}\n", format_timestamp(task.created_at)));

    output
}

/// Format the answer to a suggestion request
pub fn format_suggestion(
    pick: Option<&RankedTask<'_>>,
    task_count: usize,
    available_minutes: i64,
    mode: SuggestMode,
    now: DateTime<Utc>,
    options: &TaskListOptions,
) -> String {
    let Some(ranked) = pick else {
        return if task_count == 0 {
            "No tasks.\n".to_string()
        } else {
            format!("Nothing fits in {} min.\n", available_minutes)
        };
    };

    let task = ranked.task;
    let mut output = format!(
        "Next ({}, {} min available): {} [{}]\n",
        mode, available_minutes, task.name, task.id.short()
    );
    output.push_str(&format!(
        "  {} remaining, priority {}",
        format_minutes(task.remaining_minutes),
        colorize_priority(&priority_label(ranked), ranked.priority, options.use_color)
    ));
    if let Some(deadline) = task.deadline {
        output.push_str(&format!(", due {}", format_relative(deadline, now)));
    }
    output.push('\n');

    if i64::from(task.remaining_minutes) > available_minutes {
        output.push_str(&format!(
            "  Needs {} more than you have; make a start.\n",
            format_minutes((i64::from(task.remaining_minutes) - available_minutes) as u32)
        ));
    }

    output
}

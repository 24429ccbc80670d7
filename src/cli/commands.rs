use clap::{Parser, Subcommand};
use crate::clock::{Clock, SystemClock};
use crate::config::{self, ColorMode, Config};
use crate::db::DbConnection;
use crate::engine::RankedTask;
use crate::error::{Error, InputError};
use crate::models::{NewTask, PriorityLevel, TaskEdit, TaskId};
use crate::session::TaskSession;
use crate::store::{SqliteStore, TaskStore};
use crate::cli::parser::{parse_task_args, join_name, ParsedTaskArgs};
use crate::cli::output::{
    format_suggestion, format_task_list_table, format_task_summary, get_terminal_width, is_tty,
    TaskListOptions,
};
use crate::cli::error::{describe, user_error};
use crate::cli::abbrev;
use crate::utils::{fuzzy, parse_date_expr, parse_duration_minutes};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

#[derive(Parser)]
#[command(name = "decidr")]
#[command(about = "Decide what to work on next - tasks ranked by priority and deadline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task name and fields (e.g., "write report time=1h30m deadline=tomorrow")
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List tasks in ranked order
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Show deadlines as relative time (e.g., "in 3h", "2d ago")
        #[arg(long)]
        relative: bool,
    },
    /// Show detailed information about a task
    Show {
        /// Task ID (any unique prefix) or exact task name
        target: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Modify a task
    Modify {
        /// Task ID (any unique prefix) or exact task name
        target: String,
        /// New name words and fields (time=, priority=, deadline=; empty value or "none" clears)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID (any unique prefix) or exact task name
        target: String,
    },
    /// Suggest what to work on with the time you have
    Suggest {
        /// Available time (e.g., 30, 45m, 1h30m)
        #[arg(allow_hyphen_values = true)]
        available: String,
        /// Selection mode: finishable (fits the time) or strategic (most important)
        #[arg(long)]
        mode: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

type Session = TaskSession<SqliteStore, SystemClock>;

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Expand command abbreviations before clap sees them
    let mut args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    if args.is_empty() {
        args.push("--help".to_string());
    } else if args.len() == 1
        && !args[0].starts_with('-')
        && !abbrev::TOP_LEVEL_COMMANDS.contains(&args[0].as_str())
    {
        // `decidr <id>` is shorthand for `decidr show <id>`
        args.insert(0, "show".to_string());
    }

    let clap_args = std::iter::once("decidr".to_string())
        .chain(args)
        .collect::<Vec<_>>();
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            if e.use_stderr() {
                std::process::exit(1);
            }
            return Ok(());
        }
    };

    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let session = open_session(&config)?;

    match cli.command {
        Commands::Add { args } => handle_task_add(session, args),
        Commands::List { json, relative } => handle_task_list(&session, &config, json, relative),
        Commands::Show { target, json } => handle_task_show(&session, &config, &target, json),
        Commands::Modify { target, args } => handle_task_modify(session, &target, args),
        Commands::Delete { target } => handle_task_delete(session, &target),
        Commands::Suggest { available, mode, json } => {
            handle_suggest(&session, &config, &available, mode.as_deref(), json)
        }
    }
}

fn open_session(config: &Config) -> Result<Session> {
    let db_path = config.data_path()?;
    let conn = DbConnection::open(&db_path)?;
    let session = TaskSession::open(SqliteStore::new(conn), SystemClock)
        .with_context(|| format!("Failed to load tasks from {}", db_path.display()))?;
    Ok(session)
}

fn list_options(config: &Config, relative: bool) -> TaskListOptions {
    let use_color = match config.color {
        ColorMode::Auto => is_tty(),
        ColorMode::Always => true,
        ColorMode::Never => false,
    };
    TaskListOptions {
        use_relative_time: relative,
        use_color,
        max_width: if is_tty() { get_terminal_width() } else { None },
    }
}

fn parse_fields(args: Vec<String>) -> ParsedTaskArgs {
    match parse_task_args(args) {
        Ok(parsed) => parsed,
        Err(e) => user_error(&e.to_string()),
    }
}

fn parse_minutes(value: &str) -> Result<i64> {
    Ok(parse_duration_minutes(value).map_err(Error::from)?)
}

/// `none` clears; anything else must name a level
fn parse_priority_field(value: &str) -> Result<Option<PriorityLevel>> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match PriorityLevel::from_str(value) {
        Some(level) => Ok(Some(level)),
        None => Err(Error::from(InputError::UnknownPriority(value.to_string())).into()),
    }
}

fn parse_deadline_field(value: &str, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Ok(Some(parse_date_expr(value, now).map_err(Error::from)?))
}

/// Resolve an ID prefix, falling back to an exact task name
///
/// When nothing matches, similar task names are offered.
fn resolve_target<S: TaskStore, C: Clock>(session: &TaskSession<S, C>, target: &str) -> Result<TaskId> {
    let id_error = match session.resolve_id(target) {
        Ok(id) => return Ok(id),
        Err(e) => e,
    };

    // An ambiguous prefix may still be the exact name of one task
    let named: Vec<_> = session
        .tasks()
        .iter()
        .filter(|t| t.name.eq_ignore_ascii_case(target.trim()))
        .collect();
    if let [task] = named.as_slice() {
        return Ok(task.id.clone());
    }

    let not_found = match id_error {
        Error::NotFound(_) => Error::NotFound(target.to_string()),
        e => return Err(e.into()),
    };

    let names: Vec<&str> = session.tasks().iter().map(|t| t.name.as_str()).collect();
    let near = fuzzy::find_near_name_matches(target, &names, 3);
    if near.is_empty() {
        return Err(not_found.into());
    }

    let mut message = describe(&not_found);
    message.push_str("\n  Did you mean:");
    for (name, _) in near {
        if let Some(task) = session.tasks().iter().find(|t| t.name == name) {
            message.push_str(&format!("\n    {}  {}", task.id.short(), name));
        }
    }
    user_error(&message);
}

fn handle_task_add(mut session: Session, args: Vec<String>) -> Result<()> {
    if args.is_empty() {
        user_error("Task name is required. Usage: decidr add <name> time=<duration> [priority=<level>] [deadline=<date>]");
    }

    let parsed = parse_fields(args);
    let Some(time) = parsed.time.as_deref() else {
        user_error("Remaining time is required. Add time=<duration> (e.g., time=30m).");
    };

    let now = session.now();
    let new_task = NewTask {
        name: join_name(&parsed.name),
        remaining_minutes: parse_minutes(time)?,
        user_priority: parsed.priority.as_deref().map(parse_priority_field).transpose()?.flatten(),
        deadline: parsed
            .deadline
            .as_deref()
            .map(|d| parse_deadline_field(d, now))
            .transpose()?
            .flatten(),
    };

    let task = session.add_task(new_task)?;
    println!("Created task {}: {}", task.id.short(), task.name);
    Ok(())
}

fn handle_task_list(session: &Session, config: &Config, json: bool, relative: bool) -> Result<()> {
    let now = session.now();
    let ranked = session.list_ranked_at(now);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    print!("{}", format_task_list_table(&ranked, now, &list_options(config, relative)));
    Ok(())
}

fn handle_task_show(session: &Session, config: &Config, target: &str, json: bool) -> Result<()> {
    let id = resolve_target(session, target)?;
    let now = session.now();
    let task = session
        .get(&id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    let ranked = RankedTask::at(task, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print!("{}", format_task_summary(&ranked, now, &list_options(config, true)));
    }
    Ok(())
}

fn handle_task_modify(mut session: Session, target: &str, args: Vec<String>) -> Result<()> {
    let id = resolve_target(&session, target)?;
    let parsed = parse_fields(args);
    let now = session.now();

    let edit = TaskEdit {
        name: if parsed.name.is_empty() { None } else { Some(join_name(&parsed.name)) },
        remaining_minutes: parsed.time.as_deref().map(parse_minutes).transpose()?,
        user_priority: parsed.priority.as_deref().map(parse_priority_field).transpose()?,
        deadline: parsed
            .deadline
            .as_deref()
            .map(|d| parse_deadline_field(d, now))
            .transpose()?,
    };
    if edit.is_empty() {
        user_error("Nothing to modify. Give a new name or fields such as time=, priority=, deadline=.");
    }

    let task = session.edit_task(&id, edit)?;
    println!("Modified task {}: {}", task.id.short(), task.name);
    Ok(())
}

fn handle_task_delete(mut session: Session, target: &str) -> Result<()> {
    let id = resolve_target(&session, target)?;
    let removed = session.delete_task(&id)?;
    println!("Deleted task {}: {}", removed.id.short(), removed.name);
    Ok(())
}

fn handle_suggest(
    session: &Session,
    config: &Config,
    available: &str,
    mode: Option<&str>,
    json: bool,
) -> Result<()> {
    let available_minutes = parse_minutes(available)?;
    let mode = match mode {
        Some(value) => config::parse_mode(value)?,
        None => config.default_mode(),
    };

    let now = session.now();
    let pick = session.suggest_at(now, available_minutes, mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pick)?);
        return Ok(());
    }

    print!(
        "{}",
        format_suggestion(
            pick.as_ref(),
            session.tasks().len(),
            available_minutes,
            mode,
            now,
            &list_options(config, true),
        )
    );
    Ok(())
}

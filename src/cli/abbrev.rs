// Command abbreviation matching for the decidr CLI

/// Find all commands that start with the given prefix (case-insensitive)
pub fn find_matching_commands<'a>(prefix: &str, commands: &'a [&str]) -> Vec<&'a str> {
    let prefix_lower = prefix.to_lowercase();
    commands.iter()
        .filter(|cmd| cmd.to_lowercase().starts_with(&prefix_lower))
        .copied()
        .collect()
}

/// Find a unique command match for the given prefix
/// Returns Ok(command) if exactly one match, Err(matches) if ambiguous, Err(empty) if no match
/// Exact matches take precedence over prefix matches
pub fn find_unique_command<'a>(prefix: &str, commands: &'a [&str]) -> Result<&'a str, Vec<&'a str>> {
    let prefix_lower = prefix.to_lowercase();
    for cmd in commands {
        if cmd.to_lowercase() == prefix_lower {
            return Ok(*cmd);
        }
    }

    let matches = find_matching_commands(prefix, commands);

    if matches.len() == 1 {
        Ok(matches[0])
    } else {
        Err(matches)
    }
}

/// Top-level commands
pub const TOP_LEVEL_COMMANDS: &[&str] = &[
    "add", "list", "show", "modify", "delete", "suggest", "help"
];

/// Commands that take a task ID (used with the `<id> <command>` pattern)
pub const TASK_SUBCOMMANDS: &[&str] = &[
    "show", "modify", "delete"
];

/// Expand command abbreviations in argument list
/// Returns expanded args or error message
///
/// Also normalizes `<id> <command> ...` to `<command> <id> ...`.
pub fn expand_command_abbreviations(args: Vec<String>) -> Result<Vec<String>, String> {
    let Some(first) = args.first() else {
        return Ok(args);
    };
    if first.starts_with('-') {
        return Ok(args);
    }

    match find_unique_command(first, TOP_LEVEL_COMMANDS) {
        Ok(full_cmd) => {
            let mut expanded = vec![full_cmd.to_string()];
            expanded.extend(args.into_iter().skip(1));
            return Ok(expanded);
        }
        Err(matches) if !matches.is_empty() => {
            return Err(format!(
                "Ambiguous command '{}'. Did you mean one of: {}?",
                first,
                matches.join(", ")
            ));
        }
        Err(_) => {}
    }

    // Not a command: maybe a task ID followed by a task subcommand
    if let Some(next_arg) = args.get(1) {
        if !next_arg.starts_with('-') {
            match find_unique_command(next_arg, TASK_SUBCOMMANDS) {
                Ok(full_subcmd) => {
                    let mut expanded = vec![full_subcmd.to_string(), first.clone()];
                    expanded.extend(args.into_iter().skip(2));
                    return Ok(expanded);
                }
                Err(matches) if !matches.is_empty() => {
                    return Err(format!(
                        "Ambiguous task subcommand '{}'. Did you mean one of: {}?",
                        next_arg,
                        matches.join(", ")
                    ));
                }
                Err(_) => {}
            }
        }
    }

    // Not a command to expand, pass through
    Ok(args)
}

// CLI parsing utilities for add/modify arguments

use crate::utils::fuzzy::closest_match;

/// Parsed task arguments from command line
#[derive(Debug, Default, PartialEq)]
pub struct ParsedTaskArgs {
    pub name: Vec<String>,
    pub time: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
}

/// Field token error
#[derive(Debug, PartialEq)]
pub enum FieldParseError {
    InvalidFieldName {
        field: String,
        suggestion: String,
    },
    ReadOnlyField {
        field: String,
        hint: String,
    },
    UnknownFieldToken {
        token: String,
    },
    DuplicateField {
        field: String,
    },
}

impl std::fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldParseError::InvalidFieldName { field, suggestion } => {
                write!(f, "Unrecognized field name '{}'\n  Did you mean '{}'?", field, suggestion)
            }
            FieldParseError::ReadOnlyField { field, hint } => {
                write!(f, "Field '{}' cannot be modified directly.\n  {}", field, hint)
            }
            FieldParseError::UnknownFieldToken { token } => {
                write!(f, "Unrecognized field token '{}'\n  If this is meant to be part of the name, remove the equals sign or quote the entire name.", token)
            }
            FieldParseError::DuplicateField { field } => {
                write!(f, "Field '{}' given more than once.", field)
            }
        }
    }
}

/// Valid field names (exact match only, no abbreviations)
const FIELD_NAMES: &[&str] = &[
    "time",
    "priority",
    "deadline",
];

/// Fields that are read-only
/// These exist to give helpful error messages when users try to set them
const READ_ONLY_FIELDS: &[&str] = &[
    "id",          // Assigned on creation
    "created",     // Immutable
    "effective",   // Derived from priority and deadline
];

/// Get hint for read-only field
fn get_read_only_hint(field: &str) -> String {
    match field.to_lowercase().as_str() {
        "id" => "Task ID is assigned automatically and cannot be changed.".to_string(),
        "created" => "Created timestamp is set automatically and cannot be changed.".to_string(),
        "effective" => "Effective priority is computed from priority= and deadline=. Set those instead.".to_string(),
        _ => "This field is read-only.".to_string(),
    }
}

/// Parse a field token (field=value)
/// Returns the field name and value
/// Handles empty values (field=) by converting to field=none
fn parse_field_token(token: &str) -> Result<Option<(String, String)>, FieldParseError> {
    let Some((field, value)) = token.split_once('=') else {
        return Ok(None);
    };

    // Handle empty value (field=) -> treat as field=none
    let value = if value.is_empty() { "none" } else { value };

    // Check for read-only fields first
    if READ_ONLY_FIELDS.iter().any(|f| f.eq_ignore_ascii_case(field)) {
        return Err(FieldParseError::ReadOnlyField {
            field: field.to_string(),
            hint: get_read_only_hint(field),
        });
    }

    if FIELD_NAMES.contains(&field) {
        return Ok(Some((field.to_string(), value.to_string())));
    }

    // No exact match - try fuzzy matching for typo suggestions
    if let Some(suggestion) = closest_match(field, FIELD_NAMES, 3) {
        return Err(FieldParseError::InvalidFieldName {
            field: field.to_string(),
            suggestion: suggestion.to_string(),
        });
    }

    // Looks like a field token (alphabetic key) but isn't one we know
    if field.len() >= 2 && field.chars().all(|c| c.is_ascii_alphabetic() || c == '_' || c == '.') {
        return Err(FieldParseError::UnknownFieldToken {
            token: token.to_string(),
        });
    }

    Ok(None)
}

/// Parse task add/modify arguments
/// The name is every token that isn't a field token or flag
/// Field tokens and flags can appear anywhere in the argument list
pub fn parse_task_args(args: Vec<String>) -> Result<ParsedTaskArgs, FieldParseError> {
    let mut parsed = ParsedTaskArgs::default();

    for arg in args {
        // Flags are handled by the command handler
        if arg.starts_with("--") {
            continue;
        }

        match parse_field_token(&arg)? {
            Some((field, value)) => {
                let slot = match field.as_str() {
                    "time" => &mut parsed.time,
                    "priority" => &mut parsed.priority,
                    _ => &mut parsed.deadline,
                };
                if slot.is_some() {
                    return Err(FieldParseError::DuplicateField { field });
                }
                *slot = Some(value);
            }
            None => parsed.name.push(arg),
        }
    }

    Ok(parsed)
}

/// Join name parts into a single string
pub fn join_name(parts: &[String]) -> String {
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple_name() {
        let parsed = parse_task_args(args(&["fix", "the", "bug"])).unwrap();
        assert_eq!(parsed.name, vec!["fix", "the", "bug"]);
        assert!(parsed.time.is_none());
    }

    #[test]
    fn test_parse_with_fields() {
        let parsed = parse_task_args(args(&["fix", "bug", "time=30m", "priority=high", "deadline=+2h"])).unwrap();
        assert_eq!(parsed.name, vec!["fix", "bug"]);
        assert_eq!(parsed.time, Some("30m".to_string()));
        assert_eq!(parsed.priority, Some("high".to_string()));
        assert_eq!(parsed.deadline, Some("+2h".to_string()));
    }

    #[test]
    fn test_parse_mixed_order() {
        let parsed = parse_task_args(args(&["time=1h", "fix", "deadline=tomorrow", "bug"])).unwrap();
        assert_eq!(join_name(&parsed.name), "fix bug");
        assert_eq!(parsed.time, Some("1h".to_string()));
        assert_eq!(parsed.deadline, Some("tomorrow".to_string()));
    }

    #[test]
    fn test_field_empty_value() {
        let parsed = parse_task_args(args(&["priority="])).unwrap();
        assert_eq!(parsed.priority, Some("none".to_string()));
    }

    #[test]
    fn test_invalid_field_name() {
        let result = parse_task_args(args(&["fix", "bug", "priorty=high"]));
        assert_eq!(
            result,
            Err(FieldParseError::InvalidFieldName {
                field: "priorty".to_string(),
                suggestion: "priority".to_string(),
            })
        );
    }

    #[test]
    fn test_read_only_field() {
        let result = parse_task_args(args(&["effective=high"]));
        assert!(matches!(result, Err(FieldParseError::ReadOnlyField { .. })));
    }

    #[test]
    fn test_unknown_field_token() {
        let result = parse_task_args(args(&["fix", "project=work"]));
        assert!(matches!(result, Err(FieldParseError::UnknownFieldToken { .. })));
    }

    #[test]
    fn test_duplicate_field() {
        let result = parse_task_args(args(&["time=5", "time=10"]));
        assert_eq!(result, Err(FieldParseError::DuplicateField { field: "time".to_string() }));
    }

    #[test]
    fn test_equals_inside_name_words() {
        // Not a field-looking key, so it stays part of the name
        let parsed = parse_task_args(args(&["check", "1+1=2"])).unwrap();
        assert_eq!(parsed.name, vec!["check", "1+1=2"]);
    }

    #[test]
    fn test_flags_skipped() {
        let parsed = parse_task_args(args(&["call", "mom", "--json"])).unwrap();
        assert_eq!(parsed.name, vec!["call", "mom"]);
    }
}

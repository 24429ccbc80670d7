use predicates::prelude::*;
use test_env::TestEnv;

fn names_in_order(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_add_and_list() {
    let env = TestEnv::new();
    let id = env.add(&["Write", "report", "time=1h30m"]);
    assert_eq!(id.len(), 8);

    let stdout = env.stdout(&["list"]);
    assert!(stdout.contains("Write report"));
    assert!(stdout.contains("1h30m"));
    assert!(stdout.contains("low"));
    assert!(env.db_path().exists());
}

#[test]
fn test_list_empty() {
    let env = TestEnv::new();
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks."));
}

#[test]
fn test_list_ranks_deadline_first() {
    let env = TestEnv::new();
    env.add(&["Tidy", "desk", "time=10", "priority=low"]);
    env.add(&["Submit", "form", "time=30", "deadline=+2h"]);

    let list = env.json(&["list", "--json"]);
    assert_eq!(names_in_order(&list), vec!["Submit form", "Tidy desk"]);
    assert_eq!(list[0]["priority"], "high");
    assert!(list[0]["user_priority"].is_null());
    assert_eq!(list[1]["priority"], "low");
}

#[test]
fn test_list_json_shape() {
    let env = TestEnv::new();
    env.add(&["Plan", "trip", "time=45m", "priority=medium"]);

    let list = env.json(&["list", "--json"]);
    let task = &list[0];
    assert_eq!(task["name"], "Plan trip");
    assert_eq!(task["remaining_minutes"], 45);
    assert_eq!(task["user_priority"], "medium");
    assert_eq!(task["priority"], "medium");
    assert!(task["deadline"].is_null());
    assert!(task["id"].as_str().unwrap().len() >= 32);
    assert!(task["created_at"].is_string());
}

#[test]
fn test_very_high_priority_beats_deadline() {
    let env = TestEnv::new();
    env.add(&["Urgent", "deadline", "time=20", "deadline=+1h"]);
    env.add(&["Key", "work", "time=120", "priority=very-high"]);

    let list = env.json(&["list", "--json"]);
    assert_eq!(names_in_order(&list), vec!["Key work", "Urgent deadline"]);
    assert_eq!(list[0]["priority"], "very-high");
}

#[test]
fn test_relative_deadline_column() {
    let env = TestEnv::new();
    env.add(&["Call", "bank", "time=15", "deadline=+3d"]);

    let stdout = env.stdout(&["list", "--relative"]);
    assert!(stdout.contains("in 2d") || stdout.contains("in 3d"));
}

#[test]
fn test_show_task() {
    let env = TestEnv::new();
    let id = env.add(&["Renew", "passport", "time=40", "priority=high"]);

    let stdout = env.stdout(&["show", &id]);
    assert!(stdout.contains("Renew passport"));
    assert!(stdout.contains("Remaining:   40m"));
    assert!(stdout.contains("Priority:    high"));
    assert!(stdout.contains("Deadline:    (none)"));
}

#[test]
fn test_bare_id_shows_task() {
    let env = TestEnv::new();
    let id = env.add(&["Buy", "milk", "time=5"]);

    env.cmd()
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"));
}

#[test]
fn test_show_json() {
    let env = TestEnv::new();
    let id = env.add(&["Buy", "milk", "time=5"]);

    let task = env.json(&["show", &id, "--json"]);
    assert_eq!(task["name"], "Buy milk");
    assert_eq!(task["priority"], "low");
}

#[test]
fn test_show_by_exact_name() {
    let env = TestEnv::new();
    env.add(&["Buy", "milk", "time=5"]);

    env.cmd()
        .args(["show", "buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining:   5m"));
}

#[test]
fn test_modify_fields() {
    let env = TestEnv::new();
    let id = env.add(&["Draft", "slides", "time=2h", "priority=high", "deadline=+5d"]);

    env.cmd()
        .args(["modify", &id, "time=45m", "priority=none", "deadline="])
        .assert()
        .success()
        .stdout(predicate::str::contains("Modified task"));

    let task = env.json(&["show", &id, "--json"]);
    assert_eq!(task["remaining_minutes"], 45);
    assert!(task["user_priority"].is_null());
    assert!(task["deadline"].is_null());
    assert_eq!(task["name"], "Draft slides");
}

#[test]
fn test_modify_renames() {
    let env = TestEnv::new();
    let id = env.add(&["Draft", "slides", "time=2h"]);

    env.cmd().args(["modify", &id, "Final", "slides"]).assert().success();
    let task = env.json(&["show", &id, "--json"]);
    assert_eq!(task["name"], "Final slides");
    assert_eq!(task["remaining_minutes"], 120);
}

#[test]
fn test_id_first_syntax() {
    let env = TestEnv::new();
    let id = env.add(&["Draft", "slides", "time=2h"]);

    env.cmd().args([id.as_str(), "mod", "time=30"]).assert().success();
    let task = env.json(&["show", &id, "--json"]);
    assert_eq!(task["remaining_minutes"], 30);
}

#[test]
fn test_modify_without_changes() {
    let env = TestEnv::new();
    let id = env.add(&["Draft", "slides", "time=2h"]);

    env.cmd()
        .args(["modify", &id])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Nothing to modify"));
}

#[test]
fn test_delete_task() {
    let env = TestEnv::new();
    let id = env.add(&["Old", "chore", "time=10"]);
    env.add(&["Keep", "me", "time=10"]);

    env.cmd()
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task"));

    let list = env.json(&["list", "--json"]);
    assert_eq!(names_in_order(&list), vec!["Keep me"]);
}

#[test]
fn test_delete_missing_task() {
    let env = TestEnv::new();

    env.cmd()
        .args(["delete", "ffffffff"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Task 'ffffffff' not found."));
}

#[test]
fn test_not_found_suggests_similar_names() {
    let env = TestEnv::new();
    env.add(&["Water", "plants", "time=5"]);

    env.cmd()
        .args(["show", "water plant"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("Water plants"));
}

#[test]
fn test_add_requires_time() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "No", "estimate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Remaining time is required"));
}

#[test]
fn test_add_rejects_zero_time() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "Nothing", "time=0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("greater than 0"));
}

#[test]
fn test_add_rejects_empty_name() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "time=10"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Task name cannot be empty."));
}

#[test]
fn test_add_rejects_bad_deadline() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "Thing", "time=10", "deadline=someday"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid deadline 'someday'"));
}

#[test]
fn test_add_rejects_unknown_priority() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "Thing", "time=10", "priority=urgent"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown priority 'urgent'"));
}

#[test]
fn test_field_typo_hint() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "Thing", "tme=10"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Did you mean 'time'?"));
}

#[test]
fn test_read_only_field() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "Thing", "time=10", "effective=high"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot be modified directly"));
}

#[test]
fn test_failed_add_persists_nothing() {
    let env = TestEnv::new();
    env.cmd().args(["add", "Thing", "time=-5"]).assert().failure();

    let list = env.json(&["list", "--json"]);
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_command_abbreviations() {
    let env = TestEnv::new();
    env.cmd().args(["a", "Walk", "dog", "time=20"]).assert().success();

    env.cmd()
        .arg("l")
        .assert()
        .success()
        .stdout(predicate::str::contains("Walk dog"));
}

#[test]
fn test_ambiguous_abbreviation() {
    let env = TestEnv::new();

    env.cmd()
        .arg("s")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Ambiguous command 's'"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

//! Basic CLI E2E tests.
//!
//! Tests run the built binary against an isolated data directory and verify
//! outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_habit"))
        .args(args)
        .env("HABITS_DATA_DIR", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

fn add_habit(dir: &Path, name: &str, category: &str) -> String {
    let stdout = run_ok(dir, &["add", name, "--category", category]);
    let first = stdout.lines().next().unwrap();
    first.strip_prefix("Habit created: ").unwrap().to_string()
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_add_and_list_json() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(dir.path(), "Drink water", "health");

    let list = json(&run_ok(dir.path(), &["list", "--json"]));
    let habits = list.as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["id"], id.as_str());
    assert_eq!(habits[0]["category"], "HEALTH");
    assert_eq!(habits[0]["completedToday"], false);
    assert!(dir.path().join("habit-data.json").exists());
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_add_rejects_short_name() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["add", "ab"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Habit name must be at least 3 characters"));
}

#[test]
fn test_toggle_awards_points_and_starter() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(dir.path(), "Read a page", "learning");

    let stdout = run_ok(dir.path(), &["toggle", &id]);
    assert!(stdout.contains("Completed"));
    assert!(stdout.contains("Points: 10"));

    let badges = json(&run_ok(dir.path(), &["badges", "--json"]));
    let starter = badges
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == "STARTER")
        .unwrap();
    assert_eq!(starter["earned"], true);

    let stdout = run_ok(dir.path(), &["toggle", &id]);
    assert!(stdout.contains("Unmarked"));
    assert!(stdout.contains("Points: 0"));
}

#[test]
fn test_toggle_past_date() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(dir.path(), "Stretch", "fitness");
    let stdout = run_ok(dir.path(), &["toggle", &id, "--date", "2020-01-01"]);
    assert!(stdout.contains("2020-01-01"));

    let (_, stderr, code) = run_cli(dir.path(), &["toggle", &id, "--date", "yesterday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid date"));
}

#[test]
fn test_unknown_habit_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["toggle", "missing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("habit not found"));
}

#[test]
fn test_delete_and_archive() {
    let dir = TempDir::new().unwrap();
    let keep = add_habit(dir.path(), "Meditate", "mindfulness");
    let gone = add_habit(dir.path(), "Journal", "creativity");

    run_ok(dir.path(), &["archive", &keep]);
    run_ok(dir.path(), &["delete", &gone]);

    let list = json(&run_ok(dir.path(), &["list", "--json"]));
    let habits = list.as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["isActive"], false);

    run_ok(dir.path(), &["activate", &keep]);
    let list = json(&run_ok(dir.path(), &["list", "--json"]));
    assert_eq!(list[0]["isActive"], true);
}

#[test]
fn test_stats_today() {
    let dir = TempDir::new().unwrap();
    let a = add_habit(dir.path(), "Floss", "health");
    add_habit(dir.path(), "Plan the day", "productivity");
    run_ok(dir.path(), &["toggle", &a]);

    let today = json(&run_ok(dir.path(), &["stats", "today"]));
    assert_eq!(today["total"], 2);
    assert_eq!(today["completed"], 1);
    assert_eq!(today["percentage"], 50.0);

    let streak = run_ok(dir.path(), &["stats", "streak", &a]);
    assert_eq!(streak.trim(), "1");
}

#[test]
fn test_stats_report_and_categories() {
    let dir = TempDir::new().unwrap();
    let a = add_habit(dir.path(), "Walk", "fitness");
    run_ok(dir.path(), &["toggle", &a]);

    let report = json(&run_ok(dir.path(), &["stats", "report", "--range", "month"]));
    assert_eq!(report["range"], "month");
    assert_eq!(report["weeklyProgress"].as_array().unwrap().len(), 7);
    assert_eq!(report["bestPerforming"][0]["success_rate"], 100);

    let categories = json(&run_ok(dir.path(), &["stats", "categories"]));
    assert_eq!(categories.as_array().unwrap().len(), 8);
}

#[test]
fn test_settings_set_and_show() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["settings", "set", "soundEnabled", "false"]);
    let stdout = run_ok(dir.path(), &["settings", "show"]);
    assert!(stdout.contains("\"soundEnabled\": false"));

    let (_, stderr, code) = run_cli(dir.path(), &["settings", "set", "volume", "true"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown setting"));
}

#[test]
fn test_dark_mode_toggles() {
    let dir = TempDir::new().unwrap();
    assert!(run_ok(dir.path(), &["dark-mode"]).contains("on"));
    assert!(run_ok(dir.path(), &["dark-mode"]).contains("off"));
}

#[test]
fn test_export_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(dir.path(), "Practice guitar", "creativity");
    run_ok(dir.path(), &["toggle", &id]);

    let file = dir.path().join("export.json");
    run_ok(
        dir.path(),
        &["data", "export", "--output", file.to_str().unwrap()],
    );
    let exported = json(&std::fs::read_to_string(&file).unwrap());
    assert_eq!(exported["version"], "1.0");
    assert!(exported["exportDate"].as_str().unwrap().ends_with('Z'));

    let other = TempDir::new().unwrap();
    let summary = json(&run_ok(
        other.path(),
        &["data", "import", file.to_str().unwrap()],
    ));
    assert_eq!(summary["habits"], 1);
    assert_eq!(summary["completions"], 1);
}

#[test]
fn test_import_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.json");
    std::fs::write(&file, r#"{"habits": []}"#).unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["data", "import", file.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid export file"));
}

#[test]
fn test_clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    add_habit(dir.path(), "Drink water", "health");

    let (_, _, code) = run_cli(dir.path(), &["data", "clear"]);
    assert_eq!(code, 1);

    run_ok(dir.path(), &["data", "clear", "--yes"]);
    let list = json(&run_ok(dir.path(), &["list", "--json"]));
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_demo_only_on_empty_data() {
    let dir = TempDir::new().unwrap();
    let stdout = run_ok(dir.path(), &["data", "demo"]);
    assert!(stdout.contains("Loaded 4 demo habits"));

    let all = json(&run_ok(dir.path(), &["stats", "all"]));
    assert_eq!(all["totalCompletions"], 17);
    assert_eq!(all["points"], 170);

    let (_, _, code) = run_cli(dir.path(), &["data", "demo"]);
    assert_eq!(code, 1);
}

#[test]
fn test_demo_keeps_badges_after_habits_deleted() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(dir.path(), "Drink water", "health");
    run_ok(dir.path(), &["toggle", &id]);
    run_ok(dir.path(), &["delete", &id]);

    run_ok(dir.path(), &["data", "demo"]);
    let badges = json(&run_ok(dir.path(), &["badges", "--json"]));
    let starter = badges
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == "STARTER")
        .unwrap();
    assert_eq!(starter["earned"], true);

    let all = json(&run_ok(dir.path(), &["stats", "all"]));
    assert_eq!(all["points"], 180);
}

#[test]
fn test_remind_reports_dispatch() {
    let dir = TempDir::new().unwrap();
    add_habit(dir.path(), "Drink water", "health");
    let report = json(&run_ok(dir.path(), &["remind"]));
    // Summary notification plus its sound cue.
    assert_eq!(report["delivered"], 2);
    assert_eq!(report["failed"], 0);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_ok(dir.path(), &["config", "get", "reports.top_habits"]).trim(), "5");

    run_ok(dir.path(), &["config", "set", "reports.top_habits", "3"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "reports.top_habits"]).trim(), "3");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);

    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "reports.top_habits"]).trim(), "5");
}

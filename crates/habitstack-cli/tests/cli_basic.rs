//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitstack-cli"))
        .args(args)
        .env("HABITSTACK_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is not JSON")
}

/// A data dir whose config turns sample seeding off.
fn empty_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["config", "set", "ledger.seed_sample_data", "false"]);
    assert_eq!(code, 0, "{stderr}");
    dir
}

#[test]
fn fresh_ledger_is_seeded() {
    let dir = TempDir::new().unwrap();
    let habits = run_json(&dir, &["habit", "list"]);
    assert_eq!(habits.as_array().unwrap().len(), 3);
    let rewards = run_json(&dir, &["reward", "list"]);
    assert_eq!(rewards.as_array().unwrap().len(), 3);
    let experiments = run_json(&dir, &["experiment", "list", "--active"]);
    assert_eq!(experiments.as_array().unwrap().len(), 2);
}

#[test]
fn seeding_can_be_disabled() {
    let dir = empty_dir();
    let habits = run_json(&dir, &["habit", "list"]);
    assert!(habits.as_array().unwrap().is_empty());
}

#[test]
fn toggle_updates_profile_and_rewards() {
    let dir = empty_dir();
    let habit = run_json(&dir, &["habit", "add", "Read", "--icon", "book.fill"]);
    let id = habit["id"].as_str().unwrap().to_string();
    run_json(&dir, &["reward", "add", "Coffee", "--points", "1"]);

    let outcome = run_json(&dir, &["habit", "toggle", &id]);
    assert_eq!(outcome["completed"], true);
    assert_eq!(outcome["current_streak"], 1);
    assert_eq!(outcome["unlocked_rewards"].as_array().unwrap().len(), 1);

    let profile = run_json(&dir, &["profile", "show"]);
    assert_eq!(profile["total_completions"], 1);
    assert_eq!(profile["current_streak"], 1);

    let rewards = run_json(&dir, &["reward", "list", "--unlocked"]);
    assert_eq!(rewards.as_array().unwrap().len(), 1);

    // Undo: the counter drops, the unlocked reward stays unlocked.
    let outcome = run_json(&dir, &["habit", "toggle", &id]);
    assert_eq!(outcome["completed"], false);
    let profile = run_json(&dir, &["profile", "show"]);
    assert_eq!(profile["total_completions"], 0);
    let rewards = run_json(&dir, &["reward", "list", "--unlocked"]);
    assert_eq!(rewards.as_array().unwrap().len(), 1);
}

#[test]
fn toggle_past_day() {
    let dir = empty_dir();
    let habit = run_json(&dir, &["habit", "add", "Stretch"]);
    let id = habit["id"].as_str().unwrap().to_string();
    let outcome = run_json(&dir, &["habit", "toggle", &id, "--day", "2020-01-01"]);
    assert_eq!(outcome["day"], "2020-01-01");
    assert_eq!(outcome["current_streak"], 0);

    let (_, stderr, code) = run_cli(&dir, &["habit", "toggle", &id, "--day", "01/01/2020"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid day"));
}

#[test]
fn deleting_streak_habit_refreshes_profile() {
    let dir = empty_dir();
    let habit = run_json(&dir, &["habit", "add", "Run"]);
    let id = habit["id"].as_str().unwrap().to_string();
    run_json(&dir, &["habit", "toggle", &id]);

    let (stdout, stderr, code) = run_cli(&dir, &["habit", "delete", &id]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("Habit deleted"));

    let profile = run_json(&dir, &["profile", "show"]);
    assert_eq!(profile["current_streak"], 0);
    assert_eq!(profile["best_streak"], 1);
}

#[test]
fn debug_logging_reports_session_events() {
    let dir = empty_dir();
    let output = Command::new(env!("CARGO_BIN_EXE_habitstack-cli"))
        .args(["habit", "add", "Read"])
        .env("HABITSTACK_DATA_DIR", dir.path())
        .env("RUST_LOG", "debug")
        .output()
        .expect("Failed to execute CLI command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("session opened"), "{stderr}");
    assert!(stderr.contains("session saved"), "{stderr}");
    // Logs stay off stdout so JSON output remains parseable.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn update_rejects_blank_name() {
    let dir = empty_dir();
    let habit = run_json(&dir, &["habit", "add", "Walk"]);
    let id = habit["id"].as_str().unwrap().to_string();

    let (_, stderr, code) = run_cli(&dir, &["habit", "update", &id, "--name", "  "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("must not be blank"));

    let updated = run_json(&dir, &["habit", "update", &id, "--name", " Walk the dog "]);
    assert_eq!(updated["name"], "Walk the dog");
    let shown = run_json(&dir, &["habit", "show", &id]);
    assert_eq!(shown["name"], "Walk the dog");
}

#[test]
fn unknown_id_is_not_found() {
    let dir = empty_dir();
    let missing = "00000000-0000-4000-8000-000000000000";
    for args in [
        vec!["habit", "toggle", missing],
        vec!["reward", "redeem", missing],
        vec!["experiment", "end", missing],
        vec!["identity", "vote", missing],
        vec!["scorecard", "delete", missing],
    ] {
        let (_, stderr, code) = run_cli(&dir, &args);
        assert_eq!(code, 1, "{args:?}");
        assert!(stderr.contains("not found"), "{args:?}: {stderr}");
    }
}

#[test]
fn wizard_creates_habit_and_identity() {
    let dir = empty_dir();
    let created = run_json(
        &dir,
        &["wizard", "create", "Read", "--identity", "a reader", "--after", "I pour coffee"],
    );
    assert_eq!(created["habit"]["response"]["two_minute"], "Read");
    let habit_id = created["habit"]["id"].as_str().unwrap().to_string();

    let identities = run_json(&dir, &["identity", "list"]);
    let identity = &identities.as_array().unwrap()[0];
    assert_eq!(identity["full_statement"], "I am a reader");
    assert_eq!(identity["linked_habit_ids"][0], habit_id.as_str());

    run_json(&dir, &["habit", "toggle", &habit_id]);
    let identities = run_json(&dir, &["identity", "list"]);
    assert_eq!(identities[0]["votes_count"], 1);

    let (_, stderr, code) = run_cli(&dir, &["wizard", "create", "  "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("name is required"));
}

#[test]
fn scorecard_summary() {
    let dir = empty_dir();
    run_json(&dir, &["scorecard", "add", "Make the bed", "--rating", "+"]);
    run_json(&dir, &["scorecard", "add", "Check phone", "--rating", "-", "--category", "morning"]);
    run_json(&dir, &["scorecard", "add", "Shower", "--rating", "="]);

    let summary = run_json(&dir, &["scorecard", "summary"]);
    assert_eq!(summary["positive"], 1);
    assert_eq!(summary["negative"], 1);
    assert_eq!(summary["balance_score"], 0);
    assert_eq!(summary["habit_candidates"].as_array().unwrap().len(), 1);
}

#[test]
fn config_get_set_and_unknown_key() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "display.week_start"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "monday");

    let (_, _, code) = run_cli(&dir, &["config", "set", "display.week_start", "sunday"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "display.week_start"]);
    assert_eq!(stdout.trim(), "sunday");

    let (_, stderr, code) = run_cli(&dir, &["config", "get", "display.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn default_name_applies_to_new_profile() {
    let dir = empty_dir();
    run_cli(&dir, &["config", "set", "profile.default_name", "Robin"]);
    let profile = run_json(&dir, &["profile", "show"]);
    assert_eq!(profile["name"], "Robin");
    assert_eq!(profile["level_title"], "Beginner");
}

#[test]
fn stats_calendar_respects_week_start() {
    let dir = empty_dir();
    let monday = run_json(&dir, &["stats", "calendar", "--year", "2024", "--month", "2"]);
    assert_eq!(monday["leading_blanks"], 3);
    assert_eq!(monday["days"].as_array().unwrap().len(), 29);

    run_cli(&dir, &["config", "set", "display.week_start", "sunday"]);
    let sunday = run_json(&dir, &["stats", "calendar", "--year", "2024", "--month", "2"]);
    assert_eq!(sunday["leading_blanks"], 4);

    let (_, _, code) = run_cli(&dir, &["stats", "calendar", "--year", "2024", "--month", "13"]);
    assert_eq!(code, 1);
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("habitstack-cli"));
}

//! Integration tests for ledger persistence on an on-disk SQLite store.

use chrono::Utc;
use habitstack_core::storage::keys;
use habitstack_core::storage::database::DB_FILE;
use habitstack_core::{
    BehaviorCategory, BehaviorRating, Database, DayKey, Habit, HabitLedger, IdentityCategory,
    IdentityStatement, KeyValueStore, LedgerRepository, Reward, ScorecardBehavior,
};
use tempfile::TempDir;

fn populated_ledger() -> HabitLedger {
    let mut ledger = HabitLedger::new();
    let habit = Habit::new("Read 10 pages").with_icon("book.fill");
    let id = habit.id;
    ledger.add_habit(habit);
    ledger.add_reward(Reward::new("Episode", "Unlock with 2 points", 2));
    ledger.add_identity_statement(
        IdentityStatement::new("a reader", IdentityCategory::Learning).linked_to(id),
    );
    ledger.add_behavior(ScorecardBehavior::new(
        "Make the bed",
        BehaviorRating::Positive,
        BehaviorCategory::Morning,
    ));
    ledger.mark_scorecard_reviewed(Utc::now());
    ledger.rename_user("Sam");

    let today = DayKey::parse("2025-12-10").unwrap();
    ledger.toggle_completion(id, today.offset(-1).unwrap(), today).unwrap();
    ledger.toggle_completion(id, today, today).unwrap();
    ledger
}

#[test]
fn test_round_trip_through_sqlite_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DB_FILE);
    let ledger = populated_ledger();
    assert!(ledger.rewards[0].is_unlocked());

    {
        let mut repo = LedgerRepository::new(Database::open_at(&path).unwrap());
        repo.save(&ledger);
    }

    let repo = LedgerRepository::new(Database::open_at(&path).unwrap());
    let loaded = repo.load();
    assert_eq!(loaded, ledger);
    assert!(loaded.rewards[0].is_unlocked());
    assert_eq!(loaded.profile.name, "Sam");
    assert_eq!(loaded.habits[0].completed_days.len(), 2);
}

#[test]
fn test_blobs_live_under_fixed_keys() {
    let mut repo = LedgerRepository::new(Database::open_memory().unwrap());
    repo.save(&populated_ledger());

    let mut stored = repo.store().kv_keys().unwrap();
    stored.sort();
    let mut expected: Vec<String> = keys::ALL.iter().map(|k| k.to_string()).collect();
    expected.sort();
    assert_eq!(stored, expected);

    let habits = repo.store().kv_get(keys::HABITS).unwrap().unwrap();
    let decoded: serde_json::Value = serde_json::from_str(&habits).unwrap();
    assert_eq!(decoded[0]["completed_days"][0], "2025-12-09");
    assert_eq!(decoded[0]["habit_type"], "build");
}

#[test]
fn test_corrupt_blob_loads_as_default() {
    let mut db = Database::open_memory().unwrap();
    let ledger = populated_ledger();
    {
        let mut repo = LedgerRepository::new(db);
        repo.save(&ledger);
        db = repo.into_inner();
    }
    db.set(keys::HABITS, "not json at all").unwrap();
    db.set(keys::PROFILE, "{\"total_completions\": \"many\"}").unwrap();

    let loaded = LedgerRepository::new(db).load();
    assert!(loaded.habits.is_empty());
    assert_eq!(loaded.profile, habitstack_core::UserProfile::default());
    assert_eq!(loaded.rewards, ledger.rewards);
    assert_eq!(loaded.scorecard, ledger.scorecard);
}

#[test]
fn test_missing_keys_and_partial_records() {
    let mut db = Database::open_memory().unwrap();
    let id = uuid::Uuid::new_v4();
    db.set(
        keys::HABITS,
        &format!(
            r#"[{{"id":"{id}","name":"Walk","created_at":"2025-12-01T08:00:00Z","completed_days":["2025-12-01"]}}]"#
        ),
    )
    .unwrap();

    let loaded = LedgerRepository::new(db).load();
    assert_eq!(loaded.habits.len(), 1);
    let habit = &loaded.habits[0];
    assert_eq!(habit.icon, "star.fill");
    assert!(habit.is_completed(DayKey::parse("2025-12-01").unwrap()));
    assert!(loaded.rewards.is_empty());
    assert!(loaded.experiments.is_empty());
}

#[test]
fn test_seeded_ledger_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DB_FILE);
    let now = Utc::now();

    let first = {
        let mut repo = LedgerRepository::new(Database::open_at(&path).unwrap());
        repo.load_or_seed(true, now)
    };
    let mut repo = LedgerRepository::new(Database::open_at(&path).unwrap());
    let second = repo.load_or_seed(true, now);
    assert_eq!(first.habits.len(), 3);
    assert_eq!(second, first);
}

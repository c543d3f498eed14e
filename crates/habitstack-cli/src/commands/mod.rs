//! Subcommand handlers and the plumbing they share.

pub mod completions;
pub mod config;
pub mod experiment;
pub mod habit;
pub mod identity;
pub mod profile;
pub mod reward;
pub mod scorecard;
pub mod stats;
pub mod wizard;

use chrono::{Local, NaiveTime, Utc};
use habitstack_core::profile::DEFAULT_USER_NAME;
use habitstack_core::{
    Config, CoreError, Database, DayKey, HabitLedger, LedgerRepository, ValidationError,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// A loaded ledger bound to the on-disk store it came from.
pub struct Session {
    repo: LedgerRepository<Database>,
    pub ledger: HabitLedger,
    pub config: Config,
}

impl Session {
    pub fn open() -> Result<Self, CoreError> {
        let config = Config::load_or_default();
        let mut repo = LedgerRepository::new(Database::open()?);
        let mut ledger = repo.load_or_seed(config.ledger.seed_sample_data, Utc::now());
        if ledger.profile.total_completions == 0 && ledger.profile.name == DEFAULT_USER_NAME {
            ledger.profile.name = config.profile.default_name.clone();
        }
        debug!(
            habits = ledger.habits.len(),
            rewards = ledger.rewards.len(),
            experiments = ledger.experiments.len(),
            "session opened"
        );
        Ok(Self {
            repo,
            ledger,
            config,
        })
    }

    pub fn save(&mut self) {
        self.repo.save(&self.ledger);
        debug!(total_completions = self.ledger.profile.total_completions, "session saved");
    }
}

/// The local calendar day.
pub fn today() -> DayKey {
    DayKey::new(Local::now().date_naive())
}

/// `--day` if given, otherwise today.
pub fn day_or_today(raw: Option<&str>) -> Result<DayKey, ValidationError> {
    match raw {
        Some(raw) => DayKey::parse(raw),
        None => Ok(today()),
    }
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(raw.to_string()))
}

pub fn parse_id(kind: &str, raw: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid {kind} id: {raw}").into())
}

pub fn not_found(kind: &str, id: Uuid) -> Box<dyn std::error::Error> {
    format!("{kind} not found: {id}").into()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_times_and_days() {
        assert_eq!(
            parse_time("07:30").unwrap(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
        assert!(matches!(parse_time("7pm"), Err(ValidationError::InvalidTime(_))));
        assert_eq!(
            day_or_today(Some("2025-01-02")).unwrap(),
            DayKey::from_ymd(2025, 1, 2).unwrap()
        );
        assert!(day_or_today(Some("02/01/2025")).is_err());
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(parse_id("habit", "nope").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_id("habit", &id.to_string()).unwrap(), id);
    }
}

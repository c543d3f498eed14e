//! # Habitstack Core Library
//!
//! Business logic for Habitstack, a habit tracker built around the four laws
//! of behavior change: make it obvious, attractive, easy and satisfying.
//! Everything is available through the standalone CLI binary; the core has no
//! UI or clock dependency of its own.
//!
//! ## Architecture
//!
//! - **Ledger**: [`HabitLedger`] owns habits, rewards, experiments, the user
//!   profile and the habits scorecard. All mutations go through it.
//! - **Days**: completion history is keyed by local calendar day
//!   ([`DayKey`]). Functions that depend on "today" take it as an argument.
//! - **Storage**: JSON snapshots in SQLite via [`LedgerRepository`], TOML
//!   configuration via [`Config`].
//!
//! ## Key Components
//!
//! - [`Habit`]: a habit with its cue, craving, response and reward plan
//! - [`Reward`]: a point-gated reward
//! - [`IdentityStatement`]: "I am a person who..." with habit votes
//! - [`NewHabitWizard`]: step-by-step habit creation

pub mod day;
pub mod error;
pub mod experiment;
pub mod habit;
pub mod identity;
pub mod ledger;
pub mod level;
pub mod profile;
pub mod reward;
pub mod sample;
pub mod scorecard;
pub mod stats;
pub mod storage;
pub mod wizard;

pub use day::DayKey;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use experiment::{Experiment, ExperimentNote};
pub use habit::{
    Habit, HabitCraving, HabitCue, HabitRewardPlan, HabitType, Response, ResponseLevel,
};
pub use identity::{IdentityCategory, IdentityStatement, IdentityStrength};
pub use ledger::{HabitLedger, ToggleOutcome};
pub use level::Level;
pub use profile::UserProfile;
pub use reward::Reward;
pub use scorecard::{BehaviorCategory, BehaviorRating, HabitScorecard, ScorecardBehavior};
pub use stats::{CalendarDay, DailySummary, HabitReport, MonthCalendar, RateBand};
pub use storage::{Config, Database, KeyValueStore, LedgerRepository, MemoryStore};
pub use wizard::{NewHabitWizard, WizardError, WizardStep};

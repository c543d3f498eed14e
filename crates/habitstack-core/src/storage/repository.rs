//! Snapshot persistence for [`HabitLedger`].
//!
//! Each top-level collection is stored as a JSON blob under a fixed key.
//! Saving is best-effort: failures are logged and dropped. Loading treats a
//! blob that is missing, unreadable or undecodable the same way and falls
//! back to that collection's default, so one bad key never costs the others.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::ledger::HabitLedger;
use crate::sample;

/// Fixed storage keys.
pub mod keys {
    pub const HABITS: &str = "SavedHabits";
    pub const REWARDS: &str = "SavedRewards";
    pub const PROFILE: &str = "SavedProfile";
    pub const EXPERIMENTS: &str = "SavedExperiments";
    pub const SCORECARD: &str = "SavedScorecard";

    pub const ALL: [&str; 5] = [HABITS, REWARDS, PROFILE, EXPERIMENTS, SCORECARD];
}

pub struct LedgerRepository<S> {
    store: S,
}

impl<S: KeyValueStore> LedgerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load every collection, defaulting each one that cannot be read.
    pub fn load(&self) -> HabitLedger {
        HabitLedger {
            habits: self.load_key(keys::HABITS).unwrap_or_default(),
            rewards: self.load_key(keys::REWARDS).unwrap_or_default(),
            experiments: self.load_key(keys::EXPERIMENTS).unwrap_or_default(),
            profile: self.load_key(keys::PROFILE).unwrap_or_default(),
            scorecard: self.load_key(keys::SCORECARD).unwrap_or_default(),
        }
    }

    /// Like [`load`](Self::load), then seeds sample content into a ledger
    /// with neither habits nor rewards when `seed` is set. Seeded content is
    /// saved right away so its ids are stable across loads.
    pub fn load_or_seed(&mut self, seed: bool, now: DateTime<Utc>) -> HabitLedger {
        let mut ledger = self.load();
        if seed && sample::seed(&mut ledger, now) {
            self.save(&ledger);
        }
        ledger
    }

    /// Persist every collection. Never fails; problems are logged.
    pub fn save(&mut self, ledger: &HabitLedger) {
        self.save_key(keys::HABITS, &ledger.habits);
        self.save_key(keys::REWARDS, &ledger.rewards);
        self.save_key(keys::PROFILE, &ledger.profile);
        self.save_key(keys::EXPERIMENTS, &ledger.experiments);
        self.save_key(keys::SCORECARD, &ledger.scorecard);
    }

    fn load_key<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let blob = match self.store.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read snapshot, using defaults");
                return None;
            }
        };
        match serde_json::from_str(&blob) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding undecodable snapshot");
                None
            }
        }
    }

    fn save_key<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "failed to encode snapshot");
                return;
            }
        };
        match self.store.set(key, &json) {
            Ok(()) => debug!(key, bytes = json.len(), "saved snapshot"),
            Err(e) => warn!(key, error = %e, "failed to write snapshot"),
        }
    }
}

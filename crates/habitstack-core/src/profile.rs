//! Aggregate counters for the single user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::IdentityStatement;
use crate::level::Level;

pub const DEFAULT_USER_NAME: &str = "User";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub total_completions: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub best_streak: u32,
    #[serde(default)]
    pub identity_statements: Vec<IdentityStatement>,
    /// Times a single missed day was made up the next day.
    #[serde(default)]
    pub never_miss_twice_recoveries: u32,
    #[serde(default)]
    pub longest_never_miss_twice_streak: u32,
    #[serde(default)]
    pub days_since_start: u32,
}

fn default_name() -> String {
    DEFAULT_USER_NAME.to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::named(DEFAULT_USER_NAME)
    }
}

impl UserProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_completions: 0,
            current_streak: 0,
            best_streak: 0,
            identity_statements: Vec::new(),
            never_miss_twice_recoveries: 0,
            longest_never_miss_twice_streak: 0,
            days_since_start: 0,
        }
    }

    /// Set the current streak and raise the best streak if it was beaten.
    pub fn record_streak(&mut self, current: u32) {
        self.current_streak = current;
        self.best_streak = self.best_streak.max(current);
        self.longest_never_miss_twice_streak = self.longest_never_miss_twice_streak.max(current);
    }

    pub fn level(&self) -> Level {
        Level::current(self.total_completions)
    }

    pub fn level_title(&self) -> &'static str {
        self.level().title
    }

    pub fn level_progress(&self) -> f64 {
        Level::progress(self.total_completions)
    }

    pub fn completions_to_next_level(&self) -> u32 {
        Level::completions_to_next(self.total_completions)
    }

    pub fn current_quote(&self) -> &'static str {
        self.level().quote
    }

    /// The most reinforced identity.
    pub fn primary_identity(&self) -> Option<&IdentityStatement> {
        self.identity_statements.iter().max_by_key(|i| i.votes_count)
    }

    /// Add one vote to the identity with `identity_id`. Unknown ids are ignored.
    pub fn vote_for_identity(&mut self, identity_id: Uuid) -> bool {
        match self.identity_statements.iter_mut().find(|i| i.id == identity_id) {
            Some(identity) => {
                identity.votes_count += 1;
                true
            }
            None => false,
        }
    }

    /// 1.01 compounded over the days since start.
    pub fn compound_growth(&self) -> f64 {
        1.01_f64.powf(f64::from(self.days_since_start))
    }

    pub fn compound_growth_message(&self) -> String {
        let multiplier = self.compound_growth();
        if multiplier < 2.0 {
            format!("{:.0}% improved", (multiplier - 1.0) * 100.0)
        } else {
            format!("{multiplier:.1}x better than day 1")
        }
    }
}

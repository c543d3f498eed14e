//! Time-boxed habit experiments.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_DURATION_DAYS: u32 = 7;

/// A timestamped note on an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentNote {
    pub id: Uuid,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl ExperimentNote {
    pub fn new(content: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub duration_days: u32,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub linked_habit_ids: Vec<Uuid>,
    #[serde(default)]
    pub notes: Vec<ExperimentNote>,
}

impl Experiment {
    /// A new, active experiment starting at `start_date`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        duration_days: u32,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            duration_days,
            is_active: true,
            start_date,
            linked_habit_ids: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.start_date + Duration::days(i64::from(self.duration_days))
    }

    /// Whole days left before the end date; 0 once inactive or overdue.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> u32 {
        if !self.is_active {
            return 0;
        }
        let remaining = (self.end_date() - now).num_days().max(0);
        u32::try_from(remaining).unwrap_or(u32::MAX)
    }

    /// Elapsed whole days over the duration, clamped to `[0, 1]`.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        if self.duration_days == 0 {
            return 1.0;
        }
        let elapsed = (now - self.start_date).num_days() as f64;
        (elapsed / f64::from(self.duration_days)).clamp(0.0, 1.0)
    }

    pub fn is_completed(&self, now: DateTime<Utc>) -> bool {
        self.days_remaining(now) == 0 && self.progress(now) >= 1.0
    }

    pub fn add_note(&mut self, content: impl Into<String>, now: DateTime<Utc>) {
        self.notes.push(ExperimentNote::new(content, now));
    }
}

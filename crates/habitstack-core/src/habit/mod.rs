//! Habits and their day-based derived state.
//!
//! A habit owns a set of completed [`DayKey`]s. Every query here is a pure
//! function of that set and an explicit reference day; nothing reads the
//! wall clock.

mod laws;
mod response;

pub use laws::{HabitCraving, HabitCue, HabitRewardPlan, HabitType};
pub use response::{Response, ResponseLevel};

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day::DayKey;

pub const DEFAULT_ICON: &str = "star.fill";

/// Number of days in the completion-rate window.
pub const WEEK_DAYS: u32 = 7;

/// A single habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub habit_type: HabitType,
    #[serde(default)]
    pub cue: HabitCue,
    #[serde(default)]
    pub craving: HabitCraving,
    #[serde(default)]
    pub response: Response,
    #[serde(default)]
    pub reward_plan: HabitRewardPlan,
    #[serde(default)]
    pub completed_days: BTreeSet<DayKey>,
    /// Days on which a missed day was immediately made up.
    #[serde(default)]
    pub recovered_days: BTreeSet<DayKey>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub streak_warning: Option<String>,
    #[serde(default)]
    pub reminder_time: Option<NaiveTime>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Habit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: default_icon(),
            description: String::new(),
            habit_type: HabitType::default(),
            cue: HabitCue::default(),
            craving: HabitCraving::default(),
            response: Response::default(),
            reward_plan: HabitRewardPlan::default(),
            completed_days: BTreeSet::new(),
            recovered_days: BTreeSet::new(),
            created_at: Utc::now(),
            is_archived: false,
            streak_warning: None,
            reminder_time: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_streak_warning(mut self, warning: impl Into<String>) -> Self {
        self.streak_warning = Some(warning.into());
        self
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.response = response;
        self
    }

    pub fn is_completed(&self, day: DayKey) -> bool {
        self.completed_days.contains(&day)
    }

    /// Flip completion for `day`. Returns the new state.
    pub fn toggle_completion(&mut self, day: DayKey) -> bool {
        if self.completed_days.remove(&day) {
            false
        } else {
            self.completed_days.insert(day);
            true
        }
    }

    /// Consecutive completed days ending today, or ending yesterday when
    /// today is not yet done.
    pub fn current_streak(&self, today: DayKey) -> u32 {
        let mut cursor = if self.is_completed(today) {
            Some(today)
        } else {
            today.previous()
        };

        let mut streak = 0;
        while let Some(day) = cursor {
            if !self.is_completed(day) {
                break;
            }
            streak += 1;
            cursor = day.previous();
        }
        streak
    }

    pub fn is_streak_at_risk(&self, today: DayKey) -> bool {
        let yesterday_done = today.previous().is_some_and(|d| self.is_completed(d));
        !self.is_completed(today) && !yesterday_done && self.current_streak(today) == 0
    }

    /// Yesterday was missed, the day before was not, and today is still open.
    pub fn is_in_recovery_mode(&self, today: DayKey) -> bool {
        let (Some(yesterday), Some(day_before)) = (today.offset(-1), today.offset(-2)) else {
            return false;
        };
        !self.is_completed(yesterday) && self.is_completed(day_before) && !self.is_completed(today)
    }

    /// Completed days in `[today - 6, today]` over a fixed divisor of 7.
    pub fn weekly_completion_rate(&self, today: DayKey) -> f64 {
        let completed = (0..i64::from(WEEK_DAYS))
            .filter_map(|back| today.offset(-back))
            .filter(|day| self.is_completed(*day))
            .count();
        completed as f64 / f64::from(WEEK_DAYS)
    }

    /// Step the 2-minute-rule level up by one. No-op once mastered.
    pub fn level_up_response(&mut self) -> bool {
        self.response.level_up()
    }

    pub fn total_completions(&self) -> usize {
        self.completed_days.len()
    }

    pub fn recovery_count(&self) -> usize {
        self.recovered_days.len()
    }

    /// Whole days since creation, never less than one.
    pub fn compound_growth_days(&self, today: NaiveDate) -> i64 {
        (today - self.created_at.date_naive()).num_days().max(1)
    }

    /// One percent better per day since creation.
    pub fn compound_growth_multiplier(&self, today: NaiveDate) -> f64 {
        1.01_f64.powf(self.compound_growth_days(today) as f64)
    }

    /// "After I pour coffee, i will read one page at 08:00 in the kitchen".
    pub fn implementation_intention_statement(&self) -> String {
        let mut statement = format!("I will {}", self.response.current_version_name());
        if let Some(cue) = self.cue.implementation_intention() {
            statement.push(' ');
            statement.push_str(&cue);
        }
        match self.cue.habit_stacking_statement() {
            Some(stack) => format!("{stack}, {}", statement.to_lowercase()),
            None => statement,
        }
    }

    pub fn identity_statement(&self) -> Option<String> {
        let identity = self.craving.identity_statement.trim();
        if identity.is_empty() {
            None
        } else {
            Some(format!("I am {identity}"))
        }
    }
}

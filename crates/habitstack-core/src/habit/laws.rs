//! The four laws a habit is designed around: cue, craving, (response lives in
//! [`super::response`]) and reward.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Whether the habit is being built or broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HabitType {
    #[default]
    Build,
    #[serde(rename = "break")]
    BreakBad,
}

impl HabitType {
    pub fn display_name(&self) -> &'static str {
        match self {
            HabitType::Build => "Build",
            HabitType::BreakBad => "Break",
        }
    }
}

/// Law 1: make it obvious.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HabitCue {
    /// When the habit happens.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Where the habit happens.
    #[serde(default)]
    pub location: String,
    /// Anchor habit for stacking ("After I ...").
    #[serde(default)]
    pub current_habit: String,
}

impl HabitCue {
    /// "at 08:00 in the kitchen", or `None` when neither time nor place is set.
    pub fn implementation_intention(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(time) = self.time {
            parts.push(format!("at {}", time.format("%H:%M")));
        }
        if !self.location.trim().is_empty() {
            parts.push(format!("in {}", self.location.trim()));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn habit_stacking_statement(&self) -> Option<String> {
        let anchor = self.current_habit.trim();
        if anchor.is_empty() {
            None
        } else {
            Some(format!("After I {anchor}"))
        }
    }
}

/// Law 2: make it attractive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HabitCraving {
    /// Completes "I am ...".
    #[serde(default)]
    pub identity_statement: String,
    #[serde(default)]
    pub motivation: String,
    /// Something enjoyable paired with the habit.
    #[serde(default)]
    pub temptation_bundle: String,
}

/// Law 4: make it satisfying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRewardPlan {
    #[serde(default)]
    pub immediate_reward: String,
    #[serde(default = "default_true")]
    pub visual_progress: bool,
    #[serde(default = "default_true")]
    pub never_miss_twice: bool,
}

fn default_true() -> bool {
    true
}

impl Default for HabitRewardPlan {
    fn default() -> Self {
        Self {
            immediate_reward: String::new(),
            visual_progress: true,
            never_miss_twice: true,
        }
    }
}

//! Step-by-step new-habit wizard.
//!
//! The wizard walks through the four laws in a fixed order:
//! identity, cue, response and reward. Only the first step has a gate
//! (a non-blank name); the rest may be left empty.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::habit::{Habit, HabitCraving, HabitCue, HabitRewardPlan, HabitType, Response, ResponseLevel};
use crate::identity::{IdentityCategory, IdentityStatement};

/// Icons offered when creating a habit.
pub const ICONS: [&str; 18] = [
    "book.fill",
    "brain.head.profile",
    "pencil.line",
    "figure.run",
    "drop.fill",
    "leaf.fill",
    "moon.fill",
    "sun.max.fill",
    "heart.fill",
    "star.fill",
    "flame.fill",
    "bolt.fill",
    "cup.and.saucer.fill",
    "fork.knife",
    "bed.double.fill",
    "music.note",
    "paintbrush.fill",
    "gamecontroller.fill",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Identity,
    Cue,
    Response,
    Reward,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            WizardStep::Identity => 0,
            WizardStep::Cue => 1,
            WizardStep::Response => 2,
            WizardStep::Reward => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Identity => "Who Do You Want to Be?",
            WizardStep::Cue => "Make it Obvious",
            WizardStep::Response => "Make it Easy",
            WizardStep::Reward => "Make it Satisfying",
        }
    }

    fn next(&self) -> Option<Self> {
        match self {
            WizardStep::Identity => Some(WizardStep::Cue),
            WizardStep::Cue => Some(WizardStep::Response),
            WizardStep::Response => Some(WizardStep::Reward),
            WizardStep::Reward => None,
        }
    }

    fn previous(&self) -> Self {
        match self {
            WizardStep::Identity | WizardStep::Cue => WizardStep::Identity,
            WizardStep::Response => WizardStep::Cue,
            WizardStep::Reward => WizardStep::Response,
        }
    }
}

/// Error type for wizard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The habit name is blank.
    NameRequired,
    /// Already on the final step.
    AtLastStep,
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::NameRequired => write!(f, "A habit name is required"),
            WizardError::AtLastStep => write!(f, "Already at the last step"),
        }
    }
}

impl std::error::Error for WizardError {}

/// The result of a finished wizard.
#[derive(Debug, Clone)]
pub struct WizardOutput {
    pub habit: Habit,
    /// Present when an identity statement was entered; linked to `habit`.
    pub identity: Option<IdentityStatement>,
}

/// Form state for creating a habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHabitWizard {
    step: WizardStep,
    pub name: String,
    pub icon: String,
    pub habit_type: HabitType,
    pub identity_statement: String,
    pub motivation: String,
    pub temptation_bundle: String,
    pub cue_time: Option<NaiveTime>,
    pub cue_location: String,
    pub current_habit: String,
    pub two_minute: String,
    pub five_minute: String,
    pub ten_minute: String,
    pub full: String,
    pub immediate_reward: String,
    pub never_miss_twice: bool,
}

impl Default for NewHabitWizard {
    fn default() -> Self {
        Self {
            step: WizardStep::Identity,
            name: String::new(),
            icon: crate::habit::DEFAULT_ICON.to_string(),
            habit_type: HabitType::Build,
            identity_statement: String::new(),
            motivation: String::new(),
            temptation_bundle: String::new(),
            cue_time: None,
            cue_location: String::new(),
            current_habit: String::new(),
            two_minute: String::new(),
            five_minute: String::new(),
            ten_minute: String::new(),
            full: String::new(),
            immediate_reward: String::new(),
            never_miss_twice: true,
        }
    }
}

impl NewHabitWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_last_step(&self) -> bool {
        self.step.next().is_none()
    }

    fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Identity => self.has_name(),
            WizardStep::Reward => false,
            _ => true,
        }
    }

    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if self.step == WizardStep::Identity && !self.has_name() {
            return Err(WizardError::NameRequired);
        }
        let next = self.step.next().ok_or(WizardError::AtLastStep)?;
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    /// Build the habit (and identity, if one was entered).
    ///
    /// The 2-minute and full versions default to the habit name.
    pub fn finish(&self) -> Result<WizardOutput, WizardError> {
        if !self.has_name() {
            return Err(WizardError::NameRequired);
        }
        let name = self.name.trim().to_string();
        let or_name = |text: &str| {
            if text.trim().is_empty() {
                name.clone()
            } else {
                text.trim().to_string()
            }
        };

        let mut habit = Habit::new(name.clone()).with_icon(self.icon.clone());
        habit.habit_type = self.habit_type;
        habit.cue = HabitCue {
            time: self.cue_time,
            location: self.cue_location.trim().to_string(),
            current_habit: self.current_habit.trim().to_string(),
        };
        habit.craving = HabitCraving {
            identity_statement: self.identity_statement.trim().to_string(),
            motivation: self.motivation.trim().to_string(),
            temptation_bundle: self.temptation_bundle.trim().to_string(),
        };
        habit.response = Response {
            two_minute: or_name(&self.two_minute),
            five_minute: self.five_minute.trim().to_string(),
            ten_minute: self.ten_minute.trim().to_string(),
            full: or_name(&self.full),
            level: ResponseLevel::Gateway,
        };
        habit.reward_plan = HabitRewardPlan {
            immediate_reward: self.immediate_reward.trim().to_string(),
            visual_progress: true,
            never_miss_twice: self.never_miss_twice,
        };

        let identity = if habit.craving.identity_statement.is_empty() {
            None
        } else {
            Some(
                IdentityStatement::new(habit.craving.identity_statement.clone(), IdentityCategory::Other)
                    .linked_to(habit.id),
            )
        };

        Ok(WizardOutput { habit, identity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_blocks_first_step() {
        let mut wizard = NewHabitWizard::new();
        wizard.name = "   ".into();
        assert!(!wizard.can_advance());
        assert_eq!(wizard.advance(), Err(WizardError::NameRequired));
        assert_eq!(wizard.step(), WizardStep::Identity);
    }

    #[test]
    fn walks_all_steps_and_stops() {
        let mut wizard = NewHabitWizard::new();
        wizard.name = "Read".into();
        assert_eq!(wizard.advance(), Ok(WizardStep::Cue));
        assert_eq!(wizard.advance(), Ok(WizardStep::Response));
        assert_eq!(wizard.advance(), Ok(WizardStep::Reward));
        assert!(wizard.is_last_step());
        assert_eq!(wizard.advance(), Err(WizardError::AtLastStep));
        assert_eq!(wizard.step().title(), "Make it Satisfying");
    }

    #[test]
    fn back_saturates_at_first_step() {
        let mut wizard = NewHabitWizard::new();
        wizard.name = "Read".into();
        wizard.advance().unwrap();
        assert_eq!(wizard.back(), WizardStep::Identity);
        assert_eq!(wizard.back(), WizardStep::Identity);
    }

    #[test]
    fn finish_fills_defaults_and_links_identity() {
        let mut wizard = NewHabitWizard::new();
        wizard.name = " Read ".into();
        wizard.identity_statement = "a reader".into();
        wizard.five_minute = "Read a chapter".into();

        let output = wizard.finish().unwrap();
        assert_eq!(output.habit.name, "Read");
        assert_eq!(output.habit.response.two_minute, "Read");
        assert_eq!(output.habit.response.full, "Read");
        assert_eq!(output.habit.response.five_minute, "Read a chapter");
        assert_eq!(output.habit.response.level, ResponseLevel::Gateway);

        let identity = output.identity.unwrap();
        assert_eq!(identity.category, IdentityCategory::Other);
        assert!(identity.is_linked_to(output.habit.id));
    }

    #[test]
    fn finish_without_identity() {
        let mut wizard = NewHabitWizard::new();
        wizard.name = "Stretch".into();
        assert!(wizard.finish().unwrap().identity.is_none());
        wizard.name.clear();
        assert!(matches!(wizard.finish(), Err(WizardError::NameRequired)));
    }
}

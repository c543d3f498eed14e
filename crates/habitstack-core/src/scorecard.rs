//! Habit scorecard: an inventory of existing daily behaviors, each rated
//! positive, neutral or negative.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorRating {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl BehaviorRating {
    pub fn symbol(&self) -> &'static str {
        match self {
            BehaviorRating::Positive => "+",
            BehaviorRating::Neutral => "=",
            BehaviorRating::Negative => "-",
        }
    }

    pub fn action_advice(&self) -> &'static str {
        match self {
            BehaviorRating::Positive => "Keep and optimize this behavior",
            BehaviorRating::Neutral => "Consider if this serves your goals",
            BehaviorRating::Negative => "Apply the inversion of the 4 Laws",
        }
    }

    /// Accepts `+`, `=`, `-` or the rating name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "positive" => Some(BehaviorRating::Positive),
            "=" | "neutral" => Some(BehaviorRating::Neutral),
            "-" | "negative" => Some(BehaviorRating::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorCategory {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Work,
    Home,
    Social,
    Other,
}

impl BehaviorCategory {
    pub const ALL: [BehaviorCategory; 7] = [
        BehaviorCategory::Morning,
        BehaviorCategory::Afternoon,
        BehaviorCategory::Evening,
        BehaviorCategory::Work,
        BehaviorCategory::Home,
        BehaviorCategory::Social,
        BehaviorCategory::Other,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            BehaviorCategory::Morning => "Morning",
            BehaviorCategory::Afternoon => "Afternoon",
            BehaviorCategory::Evening => "Evening",
            BehaviorCategory::Work => "Work",
            BehaviorCategory::Home => "Home",
            BehaviorCategory::Social => "Social",
            BehaviorCategory::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().to_ascii_lowercase() == needle)
    }

    /// Common behaviors to prompt the user with.
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            BehaviorCategory::Morning => &[
                "Check phone immediately after waking",
                "Make the bed",
                "Drink a glass of water",
                "Eat breakfast",
                "Exercise or stretch",
                "Meditate",
                "Review goals for the day",
                "Hit snooze button",
            ],
            BehaviorCategory::Afternoon => &[
                "Take a lunch break",
                "Go for a walk",
                "Check social media",
                "Drink coffee/tea",
                "Snack between meals",
                "Take short breaks",
            ],
            BehaviorCategory::Evening => &[
                "Prepare tomorrow's clothes",
                "Read before bed",
                "Watch TV",
                "Scroll through phone in bed",
                "Review the day",
                "Practice gratitude",
                "Eat late-night snacks",
            ],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardBehavior {
    pub id: Uuid,
    pub behavior: String,
    #[serde(default)]
    pub rating: BehaviorRating,
    #[serde(default)]
    pub category: BehaviorCategory,
    #[serde(default)]
    pub notes: String,
    /// Set once the behavior has been turned into a habit.
    #[serde(default)]
    pub linked_habit_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ScorecardBehavior {
    pub fn new(behavior: impl Into<String>, rating: BehaviorRating, category: BehaviorCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            behavior: behavior.into(),
            rating,
            category,
            notes: String::new(),
            linked_habit_id: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HabitScorecard {
    #[serde(default)]
    pub behaviors: Vec<ScorecardBehavior>,
    #[serde(default)]
    pub last_review_date: Option<DateTime<Utc>>,
}

impl HabitScorecard {
    fn count(&self, rating: BehaviorRating) -> usize {
        self.behaviors.iter().filter(|b| b.rating == rating).count()
    }

    pub fn positive_count(&self) -> usize {
        self.count(BehaviorRating::Positive)
    }

    pub fn neutral_count(&self) -> usize {
        self.count(BehaviorRating::Neutral)
    }

    pub fn negative_count(&self) -> usize {
        self.count(BehaviorRating::Negative)
    }

    /// (positive - negative) * 100 / total, in `-100..=100`. Zero when empty.
    pub fn balance_score(&self) -> i32 {
        if self.behaviors.is_empty() {
            return 0;
        }
        let total = self.behaviors.len() as i64;
        let diff = self.positive_count() as i64 - self.negative_count() as i64;
        (diff * 100 / total) as i32
    }

    /// Positive behaviors not yet linked to a habit.
    pub fn habit_candidates(&self) -> Vec<&ScorecardBehavior> {
        self.behaviors
            .iter()
            .filter(|b| b.rating == BehaviorRating::Positive && b.linked_habit_id.is_none())
            .collect()
    }

    pub fn breaking_candidates(&self) -> Vec<&ScorecardBehavior> {
        self.behaviors
            .iter()
            .filter(|b| b.rating == BehaviorRating::Negative)
            .collect()
    }

    pub fn by_category(&self) -> BTreeMap<BehaviorCategory, Vec<&ScorecardBehavior>> {
        let mut grouped: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for behavior in &self.behaviors {
            grouped.entry(behavior.category).or_default().push(behavior);
        }
        grouped
    }

    pub fn behavior_mut(&mut self, id: Uuid) -> Option<&mut ScorecardBehavior> {
        self.behaviors.iter_mut().find(|b| b.id == id)
    }
}

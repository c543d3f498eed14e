//! Identity statements reinforced by habit completions.
//!
//! Every completion of a linked habit casts one vote for the identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdentityCategory {
    #[default]
    Health,
    Fitness,
    Learning,
    Creativity,
    Productivity,
    Relationships,
    Mindfulness,
    Finance,
    Career,
    Other,
}

impl IdentityCategory {
    pub const ALL: [IdentityCategory; 10] = [
        IdentityCategory::Health,
        IdentityCategory::Fitness,
        IdentityCategory::Learning,
        IdentityCategory::Creativity,
        IdentityCategory::Productivity,
        IdentityCategory::Relationships,
        IdentityCategory::Mindfulness,
        IdentityCategory::Finance,
        IdentityCategory::Career,
        IdentityCategory::Other,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            IdentityCategory::Health => "Health",
            IdentityCategory::Fitness => "Fitness",
            IdentityCategory::Learning => "Learning",
            IdentityCategory::Creativity => "Creativity",
            IdentityCategory::Productivity => "Productivity",
            IdentityCategory::Relationships => "Relationships",
            IdentityCategory::Mindfulness => "Mindfulness",
            IdentityCategory::Finance => "Finance",
            IdentityCategory::Career => "Career",
            IdentityCategory::Other => "Other",
        }
    }

    /// Parse a category name case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().to_ascii_lowercase() == needle)
    }

    /// Example statements offered when creating an identity.
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            IdentityCategory::Health => &[
                "someone who prioritizes their health",
                "a person who nourishes their body well",
                "someone who gets enough sleep",
                "a person who stays hydrated",
            ],
            IdentityCategory::Fitness => &[
                "an athlete",
                "someone who moves their body daily",
                "a runner",
                "someone who never misses a workout",
            ],
            IdentityCategory::Learning => &[
                "a lifelong learner",
                "someone who reads every day",
                "a curious person who asks questions",
                "someone who embraces challenges",
            ],
            IdentityCategory::Creativity => &[
                "a creative person",
                "an artist",
                "a writer",
                "someone who creates something every day",
            ],
            IdentityCategory::Productivity => &[
                "someone who finishes what they start",
                "an organized person",
                "someone who respects their time",
                "a person who plans their day",
            ],
            IdentityCategory::Relationships => &[
                "a great friend",
                "someone who stays in touch",
                "a person who listens well",
                "someone who shows up for others",
            ],
            IdentityCategory::Mindfulness => &[
                "a calm and centered person",
                "someone who meditates daily",
                "a person who responds rather than reacts",
                "someone who practices gratitude",
            ],
            IdentityCategory::Finance => &[
                "someone who saves money",
                "a financially responsible person",
                "someone who invests in their future",
                "a person who lives within their means",
            ],
            IdentityCategory::Career => &[
                "a professional who delivers quality work",
                "someone who constantly improves",
                "a leader in my field",
                "someone who helps others succeed",
            ],
            IdentityCategory::Other => &[
                "the best version of myself",
                "someone who keeps their promises",
                "a person of integrity",
            ],
        }
    }
}

/// How ingrained an identity is, bucketed by vote count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdentityStrength {
    Emerging,
    Developing,
    Established,
    Strong,
    CoreIdentity,
}

impl IdentityStrength {
    pub fn from_votes(votes: u32) -> Self {
        match votes {
            0..=4 => IdentityStrength::Emerging,
            5..=19 => IdentityStrength::Developing,
            20..=49 => IdentityStrength::Established,
            50..=99 => IdentityStrength::Strong,
            _ => IdentityStrength::CoreIdentity,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdentityStrength::Emerging => "Emerging",
            IdentityStrength::Developing => "Developing",
            IdentityStrength::Established => "Established",
            IdentityStrength::Strong => "Strong",
            IdentityStrength::CoreIdentity => "Core Identity",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            IdentityStrength::Emerging => "Just starting to form",
            IdentityStrength::Developing => "Building momentum",
            IdentityStrength::Established => "Becoming natural",
            IdentityStrength::Strong => "Deeply ingrained",
            IdentityStrength::CoreIdentity => "Part of who you are",
        }
    }

    pub fn progress(&self) -> f64 {
        match self {
            IdentityStrength::Emerging => 0.1,
            IdentityStrength::Developing => 0.3,
            IdentityStrength::Established => 0.5,
            IdentityStrength::Strong => 0.75,
            IdentityStrength::CoreIdentity => 1.0,
        }
    }
}

/// "I am ..." statement linked to the habits that reinforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityStatement {
    pub id: Uuid,
    pub statement: String,
    #[serde(default)]
    pub category: IdentityCategory,
    #[serde(default)]
    pub linked_habit_ids: Vec<Uuid>,
    #[serde(default)]
    pub votes_count: u32,
    pub created_at: DateTime<Utc>,
}

impl IdentityStatement {
    pub fn new(statement: impl Into<String>, category: IdentityCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            statement: statement.into(),
            category,
            linked_habit_ids: Vec::new(),
            votes_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn linked_to(mut self, habit_id: Uuid) -> Self {
        if !self.linked_habit_ids.contains(&habit_id) {
            self.linked_habit_ids.push(habit_id);
        }
        self
    }

    pub fn is_linked_to(&self, habit_id: Uuid) -> bool {
        self.linked_habit_ids.contains(&habit_id)
    }

    pub fn full_statement(&self) -> String {
        format!("I am {}", self.statement)
    }

    pub fn strength(&self) -> IdentityStrength {
        IdentityStrength::from_votes(self.votes_count)
    }
}

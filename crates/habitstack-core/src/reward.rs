//! Point-threshold rewards.
//!
//! The unlock state is not stored on the reward. It is derived from the two
//! counters on every read, so writing either counter can never leave it
//! stale. The stored `is_unlocked` field only exists in the snapshot format
//! and is ignored on decode.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RewardRecord", into = "RewardRecord")]
pub struct Reward {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub points_required: u32,
    pub points_earned: u32,
    pub linked_habit_id: Option<Uuid>,
}

impl Reward {
    pub fn new(name: impl Into<String>, description: impl Into<String>, points_required: u32) -> Self {
        Self::with_points(name, description, points_required, 0)
    }

    pub fn with_points(
        name: impl Into<String>,
        description: impl Into<String>,
        points_required: u32,
        points_earned: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            points_required,
            points_earned,
            linked_habit_id: None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.points_earned >= self.points_required
    }

    /// Add points unless already unlocked. Returns `true` if this call
    /// unlocked the reward.
    pub fn add_points(&mut self, points: u32) -> bool {
        if self.is_unlocked() {
            return false;
        }
        self.points_earned = self.points_earned.saturating_add(points);
        self.is_unlocked()
    }

    /// Spend the reward: earned points go back to zero.
    pub fn redeem(&mut self) {
        self.points_earned = 0;
    }

    pub fn set_points_required(&mut self, points_required: u32) {
        self.points_required = points_required;
    }

    pub fn progress(&self) -> f64 {
        if self.points_required == 0 {
            return 0.0;
        }
        f64::from(self.points_earned) / f64::from(self.points_required)
    }
}

/// Snapshot shape of a [`Reward`].
#[derive(Serialize, Deserialize)]
struct RewardRecord {
    id: Uuid,
    name: String,
    #[serde(default)]
    description: String,
    points_required: u32,
    #[serde(default)]
    points_earned: u32,
    #[serde(default)]
    is_unlocked: bool,
    #[serde(default)]
    linked_habit_id: Option<Uuid>,
}

impl From<RewardRecord> for Reward {
    fn from(record: RewardRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            points_required: record.points_required,
            points_earned: record.points_earned,
            linked_habit_id: record.linked_habit_id,
        }
    }
}

impl From<Reward> for RewardRecord {
    fn from(reward: Reward) -> Self {
        Self {
            is_unlocked: reward.is_unlocked(),
            id: reward.id,
            name: reward.name,
            description: reward.description,
            points_required: reward.points_required,
            points_earned: reward.points_earned,
            linked_habit_id: reward.linked_habit_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocks_exactly_at_threshold() {
        let mut reward = Reward::new("Watch an Episode", "Unlock with 5 points", 5);
        for _ in 0..4 {
            assert!(!reward.add_points(1));
        }
        assert_eq!(reward.points_earned, 4);
        assert!(!reward.is_unlocked());
        assert!(reward.add_points(1));
        assert_eq!(reward.points_earned, 5);
        assert!(reward.is_unlocked());
    }

    #[test]
    fn unlocked_reward_stops_accumulating() {
        let mut reward = Reward::with_points("Podcast", "", 3, 3);
        assert!(reward.is_unlocked());
        assert!(!reward.add_points(1));
        assert_eq!(reward.points_earned, 3);
    }

    #[test]
    fn redeem_resets_both_counters() {
        let mut reward = Reward::with_points("Podcast", "", 3, 3);
        reward.redeem();
        assert_eq!(reward.points_earned, 0);
        assert!(!reward.is_unlocked());
    }

    #[test]
    fn decode_recomputes_unlock_flag() {
        let json = format!(
            r#"{{"id":"{}","name":"Scroll","points_required":10,"points_earned":12,"is_unlocked":false}}"#,
            Uuid::new_v4()
        );
        let reward: Reward = serde_json::from_str(&json).unwrap();
        assert!(reward.is_unlocked());
    }

    #[test]
    fn direct_counter_writes_keep_unlock_in_sync() {
        let mut reward = Reward::new("Episode", "", 5);
        reward.points_earned = 5;
        assert!(reward.is_unlocked());

        let mut reward = Reward::with_points("Podcast", "", 10, 4);
        assert!(!reward.is_unlocked());
        reward.points_required = 3;
        assert!(reward.is_unlocked());
        reward.set_points_required(8);
        assert!(!reward.is_unlocked());
    }

    #[test]
    fn snapshot_carries_derived_unlock_flag() {
        let reward = Reward::with_points("Podcast", "", 3, 3);
        let json = serde_json::to_value(&reward).unwrap();
        assert_eq!(json["is_unlocked"], true);
        let back: Reward = serde_json::from_value(json).unwrap();
        assert_eq!(back, reward);
    }

    #[test]
    fn zero_threshold_progress_is_zero() {
        let reward = Reward::new("Free", "", 0);
        assert!(reward.is_unlocked());
        assert_eq!(reward.progress(), 0.0);
    }
}

//! The habit ledger: the single owned aggregate of all user data.
//!
//! Every mutation runs to completion before returning, including the derived
//! recomputation it triggers (streaks, reward points, identity votes). Lookups
//! by id that miss are silent no-ops; mutators report whether anything was
//! found so callers can tell the user.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::day::DayKey;
use crate::experiment::Experiment;
use crate::habit::Habit;
use crate::identity::IdentityStatement;
use crate::profile::UserProfile;
use crate::reward::Reward;
use crate::scorecard::{HabitScorecard, ScorecardBehavior};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HabitLedger {
    pub habits: Vec<Habit>,
    pub rewards: Vec<Reward>,
    pub experiments: Vec<Experiment>,
    pub profile: UserProfile,
    pub scorecard: HabitScorecard,
}

/// What a single [`HabitLedger::toggle_completion`] did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub habit_id: Uuid,
    pub day: DayKey,
    /// State of `day` after the toggle.
    pub completed: bool,
    /// Rewards that crossed their threshold because of this toggle.
    pub unlocked_rewards: Vec<Uuid>,
    /// Identity statements that received a vote.
    pub identity_votes: usize,
    /// A missed day was made up by completing today.
    pub recovered: bool,
    pub current_streak: u32,
}

impl HabitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty() && self.rewards.is_empty()
    }

    // ── Habits ──────────────────────────────────────────────────────────

    pub fn habit(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    fn habit_index(&self, id: Uuid) -> Option<usize> {
        self.habits.iter().position(|h| h.id == id)
    }

    pub fn add_habit(&mut self, habit: Habit) {
        debug!(habit_id = %habit.id, name = %habit.name, "adding habit");
        self.habits.push(habit);
    }

    /// Replace the stored habit with the same id.
    pub fn update_habit(&mut self, habit: Habit) -> bool {
        match self.habit_index(habit.id) {
            Some(index) => {
                self.habits[index] = habit;
                true
            }
            None => false,
        }
    }

    /// Remove a habit and drop every identity or scorecard link to it.
    pub fn delete_habit(&mut self, id: Uuid) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            return false;
        }

        for identity in &mut self.profile.identity_statements {
            identity.linked_habit_ids.retain(|linked| *linked != id);
        }
        for behavior in &mut self.scorecard.behaviors {
            if behavior.linked_habit_id == Some(id) {
                behavior.linked_habit_id = None;
            }
        }
        debug!(habit_id = %id, "deleted habit");
        true
    }

    pub fn archive_habit(&mut self, id: Uuid) -> bool {
        self.set_archived(id, true)
    }

    pub fn unarchive_habit(&mut self, id: Uuid) -> bool {
        self.set_archived(id, false)
    }

    fn set_archived(&mut self, id: Uuid, archived: bool) -> bool {
        match self.habit_index(id) {
            Some(index) => {
                self.habits[index].is_archived = archived;
                true
            }
            None => false,
        }
    }

    pub fn active_habits(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter().filter(|h| !h.is_archived)
    }

    pub fn archived_habits(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter().filter(|h| h.is_archived)
    }

    /// Flip completion of `day` for a habit and apply the side effects.
    ///
    /// Completing grants one point to every locked reward and one vote to
    /// every linked identity. Un-completing only decrements the completion
    /// counter: points and votes already granted are kept.
    ///
    /// Recovery is judged against `today`: if the habit was in recovery mode
    /// before the toggle and is not afterwards (because today is now done),
    /// a recovery is recorded once for that day.
    pub fn toggle_completion(&mut self, habit_id: Uuid, day: DayKey, today: DayKey) -> Option<ToggleOutcome> {
        let index = self.habit_index(habit_id)?;

        let was_recovering = self.habits[index].is_in_recovery_mode(today);
        let completed = self.habits[index].toggle_completion(day);

        let mut unlocked_rewards = Vec::new();
        let mut identity_votes = 0;
        if completed {
            self.profile.total_completions = self.profile.total_completions.saturating_add(1);
            unlocked_rewards = self.add_points_to_rewards(1);
            identity_votes = self.vote_for_linked_identities(habit_id);
        } else {
            self.profile.total_completions = self.profile.total_completions.saturating_sub(1);
        }

        let mut recovered = false;
        let habit = &mut self.habits[index];
        if was_recovering && habit.is_completed(today) && !habit.is_in_recovery_mode(today) {
            recovered = habit.recovered_days.insert(today);
            if recovered {
                self.profile.never_miss_twice_recoveries += 1;
                info!(habit_id = %habit_id, day = %today, "never-miss-twice recovery recorded");
            }
        }

        self.update_streak(today);
        let current_streak = self.habits[index].current_streak(today);

        debug!(
            habit_id = %habit_id,
            day = %day,
            completed,
            total = self.profile.total_completions,
            "toggled completion"
        );

        Some(ToggleOutcome {
            habit_id,
            day,
            completed,
            unlocked_rewards,
            identity_votes,
            recovered,
            current_streak,
        })
    }

    /// Raise the habit's 2-minute-rule level by one, capped at mastered.
    /// Returns `None` for an unknown id, otherwise whether the level moved.
    pub fn level_up_response(&mut self, habit_id: Uuid) -> Option<bool> {
        let index = self.habit_index(habit_id)?;
        Some(self.habits[index].level_up_response())
    }

    /// Profile streak = best current streak across active habits.
    ///
    /// Also refreshes `days_since_start` from the oldest habit.
    pub fn update_streak(&mut self, today: DayKey) {
        let current = self
            .active_habits()
            .map(|h| h.current_streak(today))
            .max()
            .unwrap_or(0);
        self.profile.record_streak(current);

        if let Some(first) = self.habits.iter().map(|h| h.created_at.date_naive()).min() {
            let days = (today.date() - first).num_days().max(0);
            self.profile.days_since_start = u32::try_from(days).unwrap_or(u32::MAX);
        }
    }

    /// Share of active habits completed on `today`; 0 with no active habits.
    pub fn today_completion_rate(&self, today: DayKey) -> f64 {
        let (total, done) = self.active_habits().fold((0usize, 0usize), |(total, done), h| {
            (total + 1, done + usize::from(h.is_completed(today)))
        });
        if total == 0 {
            0.0
        } else {
            done as f64 / total as f64
        }
    }

    /// Number of habits completed on `day`.
    pub fn completion_count(&self, day: DayKey) -> usize {
        self.habits.iter().filter(|h| h.is_completed(day)).count()
    }

    /// Fraction of the month's elapsed days (up to `today`) on which at
    /// least one habit was completed.
    pub fn month_completion_rate(&self, year: i32, month: u32, today: DayKey) -> f64 {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return 0.0;
        };

        let mut total_days = 0u32;
        let mut completed_days = 0u32;
        for date in first.iter_days().take_while(|d| d.month() == month && d.year() == year) {
            if date > today.date() {
                break;
            }
            total_days += 1;
            if self.completion_count(DayKey::new(date)) > 0 {
                completed_days += 1;
            }
        }

        if total_days == 0 {
            0.0
        } else {
            f64::from(completed_days) / f64::from(total_days)
        }
    }

    // ── Rewards ─────────────────────────────────────────────────────────

    pub fn reward(&self, id: Uuid) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.id == id)
    }

    pub fn add_reward(&mut self, reward: Reward) {
        debug!(reward_id = %reward.id, name = %reward.name, "adding reward");
        self.rewards.push(reward);
    }

    pub fn update_reward(&mut self, reward: Reward) -> bool {
        match self.rewards.iter_mut().find(|r| r.id == reward.id) {
            Some(slot) => {
                *slot = reward;
                true
            }
            None => false,
        }
    }

    pub fn delete_reward(&mut self, id: Uuid) -> bool {
        let before = self.rewards.len();
        self.rewards.retain(|r| r.id != id);
        self.rewards.len() != before
    }

    /// Give `points` to every reward that is still locked. Returns the ids
    /// of rewards that unlocked as a result.
    pub fn add_points_to_rewards(&mut self, points: u32) -> Vec<Uuid> {
        let mut unlocked = Vec::new();
        for reward in &mut self.rewards {
            if reward.add_points(points) {
                info!(reward_id = %reward.id, name = %reward.name, "reward unlocked");
                unlocked.push(reward.id);
            }
        }
        unlocked
    }

    pub fn redeem_reward(&mut self, id: Uuid) -> bool {
        match self.rewards.iter_mut().find(|r| r.id == id) {
            Some(reward) => {
                reward.redeem();
                debug!(reward_id = %id, "reward redeemed");
                true
            }
            None => false,
        }
    }

    // ── Experiments ─────────────────────────────────────────────────────

    pub fn experiment(&self, id: Uuid) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.id == id)
    }

    fn experiment_mut(&mut self, id: Uuid) -> Option<&mut Experiment> {
        self.experiments.iter_mut().find(|e| e.id == id)
    }

    pub fn add_experiment(&mut self, experiment: Experiment) {
        debug!(experiment_id = %experiment.id, name = %experiment.name, "adding experiment");
        self.experiments.push(experiment);
    }

    /// Activate and restart the clock at `now`.
    pub fn start_experiment(&mut self, id: Uuid, now: DateTime<Utc>) -> bool {
        match self.experiment_mut(id) {
            Some(experiment) => {
                experiment.is_active = true;
                experiment.start_date = now;
                true
            }
            None => false,
        }
    }

    pub fn end_experiment(&mut self, id: Uuid) -> bool {
        match self.experiment_mut(id) {
            Some(experiment) => {
                experiment.is_active = false;
                true
            }
            None => false,
        }
    }

    pub fn delete_experiment(&mut self, id: Uuid) -> bool {
        let before = self.experiments.len();
        self.experiments.retain(|e| e.id != id);
        self.experiments.len() != before
    }

    pub fn add_experiment_note(&mut self, id: Uuid, note: impl Into<String>, now: DateTime<Utc>) -> bool {
        match self.experiment_mut(id) {
            Some(experiment) => {
                experiment.add_note(note, now);
                true
            }
            None => false,
        }
    }

    pub fn active_experiments(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.iter().filter(|e| e.is_active)
    }

    // ── Profile & identity ──────────────────────────────────────────────

    pub fn rename_user(&mut self, name: impl Into<String>) {
        self.profile.name = name.into();
    }

    /// Wipe progress while keeping the user's name, identities and the
    /// definitions of habits and rewards.
    pub fn reset_progress(&mut self) {
        let mut identities = std::mem::take(&mut self.profile.identity_statements);
        for identity in &mut identities {
            identity.votes_count = 0;
        }
        self.profile = UserProfile::named(self.profile.name.clone());
        self.profile.identity_statements = identities;

        for habit in &mut self.habits {
            habit.completed_days.clear();
            habit.recovered_days.clear();
        }
        for reward in &mut self.rewards {
            reward.redeem();
        }
        info!("progress reset");
    }

    pub fn add_identity_statement(&mut self, identity: IdentityStatement) {
        self.profile.identity_statements.push(identity);
    }

    pub fn delete_identity_statement(&mut self, id: Uuid) -> bool {
        let identities = &mut self.profile.identity_statements;
        let before = identities.len();
        identities.retain(|i| i.id != id);
        identities.len() != before
    }

    pub fn vote_for_identity(&mut self, id: Uuid) -> bool {
        self.profile.vote_for_identity(id)
    }

    /// Link an existing identity to a habit so completions vote for it.
    pub fn link_identity_to_habit(&mut self, identity_id: Uuid, habit_id: Uuid) -> bool {
        if self.habit(habit_id).is_none() {
            return false;
        }
        match self
            .profile
            .identity_statements
            .iter_mut()
            .find(|i| i.id == identity_id)
        {
            Some(identity) => {
                if !identity.is_linked_to(habit_id) {
                    identity.linked_habit_ids.push(habit_id);
                }
                true
            }
            None => false,
        }
    }

    fn vote_for_linked_identities(&mut self, habit_id: Uuid) -> usize {
        let mut votes = 0;
        for identity in &mut self.profile.identity_statements {
            if identity.is_linked_to(habit_id) {
                identity.votes_count += 1;
                votes += 1;
            }
        }
        votes
    }

    // ── Scorecard ───────────────────────────────────────────────────────

    pub fn add_behavior(&mut self, behavior: ScorecardBehavior) {
        self.scorecard.behaviors.push(behavior);
    }

    pub fn update_behavior(&mut self, behavior: ScorecardBehavior) -> bool {
        match self.scorecard.behavior_mut(behavior.id) {
            Some(slot) => {
                *slot = behavior;
                true
            }
            None => false,
        }
    }

    pub fn delete_behavior(&mut self, id: Uuid) -> bool {
        let before = self.scorecard.behaviors.len();
        self.scorecard.behaviors.retain(|b| b.id != id);
        self.scorecard.behaviors.len() != before
    }

    pub fn link_behavior_to_habit(&mut self, behavior_id: Uuid, habit_id: Uuid) -> bool {
        if self.habit(habit_id).is_none() {
            return false;
        }
        match self.scorecard.behavior_mut(behavior_id) {
            Some(behavior) => {
                behavior.linked_habit_id = Some(habit_id);
                true
            }
            None => false,
        }
    }

    pub fn mark_scorecard_reviewed(&mut self, now: DateTime<Utc>) {
        self.scorecard.last_review_date = Some(now);
    }
}

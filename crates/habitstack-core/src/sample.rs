//! Starter content for a brand-new ledger.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::experiment::Experiment;
use crate::habit::{Habit, Response};
use crate::ledger::HabitLedger;
use crate::reward::Reward;

/// Fill an empty ledger with three habits, three rewards and two experiments.
///
/// Does nothing if the ledger already has habits or rewards.
pub fn seed(ledger: &mut HabitLedger, now: DateTime<Utc>) -> bool {
    if !ledger.is_empty() {
        return false;
    }

    ledger.habits = vec![
        Habit::new("Read 10 pages")
            .with_description("After pouring coffee.")
            .with_icon("book.fill"),
        Habit::new("Meditate 5 mins")
            .with_description("Before brushing teeth.")
            .with_icon("brain.head.profile")
            .with_response(Response {
                two_minute: "Too tired? Just 3 deep breaths.".into(),
                ..Default::default()
            }),
        Habit::new("Journaling")
            .with_description("After dinner.")
            .with_icon("pencil.line")
            .with_streak_warning("Recover the streak. Don't miss twice."),
    ];

    ledger.rewards = vec![
        Reward::new("Watch an Episode", "Unlock with 5 points", 5),
        Reward::new("Listen to Podcast", "Unlock with 3 points", 3),
        Reward::new("Social Media Scroll", "Unlock with 10 points", 10),
    ];

    ledger.experiments = vec![
        Experiment::new(
            "Morning Routine Stack",
            "Try stacking 3 habits after waking up",
            7,
            now,
        ),
        Experiment::new("Evening Wind-down", "No screens 1 hour before bed", 14, now),
    ];

    info!("seeded sample habits, rewards and experiments");
    true
}

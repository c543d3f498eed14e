//! Property tests for streaks and completion toggling.

use std::collections::BTreeSet;

use habitstack_core::{DayKey, Habit, HabitLedger, Reward};
use proptest::prelude::*;

fn base_day() -> DayKey {
    DayKey::from_ymd(2025, 6, 15).unwrap()
}

proptest! {
    #[test]
    fn streak_equals_run_length(n in 1i64..120, done_today in any::<bool>()) {
        let today = base_day();
        let end = if done_today { today } else { today.previous().unwrap() };
        let mut habit = Habit::new("Read");
        for back in 0..n {
            habit.toggle_completion(end.offset(-back).unwrap());
        }
        prop_assert_eq!(habit.current_streak(today), n as u32);
    }

    #[test]
    fn gap_truncates_streak(n in 2i64..60, gap in 1i64..60) {
        prop_assume!(gap < n);
        let today = base_day();
        let mut habit = Habit::new("Read");
        for back in 0..n {
            habit.toggle_completion(today.offset(-back).unwrap());
        }
        habit.toggle_completion(today.offset(-gap).unwrap());
        prop_assert_eq!(habit.current_streak(today), gap as u32);
    }

    #[test]
    fn double_toggle_restores_days_and_total(
        offsets in prop::collection::btree_set(-60i64..=0, 0..20),
        target in -60i64..=0,
    ) {
        let today = base_day();
        let mut ledger = HabitLedger::new();
        let mut habit = Habit::new("Read");
        for offset in &offsets {
            habit.completed_days.insert(today.offset(*offset).unwrap());
        }
        let id = habit.id;
        ledger.add_habit(habit);
        ledger.add_reward(Reward::new("Episode", "", 1000));
        ledger.profile.total_completions = offsets.len() as u32;

        let days_before: BTreeSet<DayKey> = ledger.habit(id).unwrap().completed_days.clone();
        let total_before = ledger.profile.total_completions;
        let day = today.offset(target).unwrap();

        ledger.toggle_completion(id, day, today).unwrap();
        ledger.toggle_completion(id, day, today).unwrap();

        prop_assert_eq!(&ledger.habit(id).unwrap().completed_days, &days_before);
        prop_assert_eq!(ledger.profile.total_completions, total_before);
        // Points granted by whichever toggle completed the day are kept.
        prop_assert_eq!(ledger.rewards[0].points_earned, 1);
    }

    #[test]
    fn weekly_rate_is_fraction_of_seven(
        offsets in prop::collection::btree_set(-30i64..=0, 0..30),
    ) {
        let today = base_day();
        let mut habit = Habit::new("Read");
        for offset in &offsets {
            habit.completed_days.insert(today.offset(*offset).unwrap());
        }
        let in_window = offsets.iter().filter(|o| **o >= -6).count();
        prop_assert_eq!(habit.weekly_completion_rate(today), in_window as f64 / 7.0);
    }
}

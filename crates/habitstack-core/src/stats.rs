//! Read-only reports over a [`HabitLedger`] for display.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::day::DayKey;
use crate::habit::Habit;
use crate::ledger::HabitLedger;

/// Weekly-rate band used to color progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBand {
    Good,
    Fair,
    Poor,
}

impl RateBand {
    pub fn classify(rate: f64, good: f64, fair: f64) -> Self {
        if rate >= good {
            RateBand::Good
        } else if rate >= fair {
            RateBand::Fair
        } else {
            RateBand::Poor
        }
    }
}

/// Per-habit snapshot as of a given day.
#[derive(Debug, Clone, Serialize)]
pub struct HabitReport {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub completed_today: bool,
    pub current_streak: u32,
    pub weekly_completion_rate: f64,
    pub streak_at_risk: bool,
    pub in_recovery_mode: bool,
    pub recovery_count: usize,
    pub total_completions: usize,
    pub response_level: &'static str,
    pub current_version: String,
    pub implementation_intention: String,
    pub streak_warning: Option<String>,
    pub is_archived: bool,
}

impl HabitReport {
    pub fn new(habit: &Habit, today: DayKey) -> Self {
        Self {
            id: habit.id,
            name: habit.name.clone(),
            icon: habit.icon.clone(),
            completed_today: habit.is_completed(today),
            current_streak: habit.current_streak(today),
            weekly_completion_rate: habit.weekly_completion_rate(today),
            streak_at_risk: habit.is_streak_at_risk(today),
            in_recovery_mode: habit.is_in_recovery_mode(today),
            recovery_count: habit.recovery_count(),
            total_completions: habit.total_completions(),
            response_level: habit.response.level_name(),
            current_version: habit.response.current_version_name().to_string(),
            implementation_intention: habit.implementation_intention_statement(),
            streak_warning: habit.streak_warning.clone(),
            is_archived: habit.is_archived,
        }
    }
}

/// Profile-level summary for a day.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub day: DayKey,
    pub completed: usize,
    pub active: usize,
    pub completion_rate: f64,
    pub total_completions: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub level: u32,
    pub level_title: &'static str,
    pub level_progress: f64,
    pub completions_to_next_level: u32,
    pub quote: &'static str,
    pub never_miss_twice_recoveries: u32,
    pub compound_growth: String,
}

impl DailySummary {
    pub fn new(ledger: &HabitLedger, today: DayKey) -> Self {
        let profile = &ledger.profile;
        let active = ledger.active_habits().count();
        let completed = ledger.active_habits().filter(|h| h.is_completed(today)).count();
        let level = profile.level();
        Self {
            day: today,
            completed,
            active,
            completion_rate: ledger.today_completion_rate(today),
            total_completions: profile.total_completions,
            current_streak: profile.current_streak,
            best_streak: profile.best_streak,
            level: level.number,
            level_title: level.title,
            level_progress: profile.level_progress(),
            completions_to_next_level: profile.completions_to_next_level(),
            quote: level.quote,
            never_miss_twice_recoveries: profile.never_miss_twice_recoveries,
            compound_growth: profile.compound_growth_message(),
        }
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub day: DayKey,
    pub completions: usize,
    pub is_future: bool,
}

/// Month grid with per-day completion counts.
#[derive(Debug, Clone, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub habit_count: usize,
    pub completion_rate: f64,
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    /// `None` when `year`/`month` is not a real month.
    pub fn new(ledger: &HabitLedger, year: i32, month: u32, today: DayKey) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days = first
            .iter_days()
            .take_while(|d| d.month() == month && d.year() == year)
            .map(|date| {
                let day = DayKey::new(date);
                CalendarDay {
                    day,
                    completions: ledger.completion_count(day),
                    is_future: date > today.date(),
                }
            })
            .collect();

        Some(Self {
            year,
            month,
            habit_count: ledger.habits.len(),
            completion_rate: ledger.month_completion_rate(year, month, today),
            days,
        })
    }

    /// Empty cells before the 1st in a grid whose rows start on Monday
    /// (or Sunday).
    pub fn leading_blanks(&self, sunday_start: bool) -> u32 {
        let Some(first) = self.days.first() else {
            return 0;
        };
        let weekday = first.day.date().weekday();
        if sunday_start {
            weekday.num_days_from_sunday()
        } else {
            weekday.num_days_from_monday()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_band_thresholds() {
        assert_eq!(RateBand::classify(0.8, 0.8, 0.5), RateBand::Good);
        assert_eq!(RateBand::classify(0.5, 0.8, 0.5), RateBand::Fair);
        assert_eq!(RateBand::classify(0.49, 0.8, 0.5), RateBand::Poor);
    }

    #[test]
    fn calendar_covers_whole_month() {
        let mut ledger = HabitLedger::new();
        let mut habit = Habit::new("Read");
        let today = DayKey::parse("2024-02-10").unwrap();
        habit.completed_days.insert(today);
        ledger.add_habit(habit);

        let calendar = MonthCalendar::new(&ledger, 2024, 2, today).unwrap();
        assert_eq!(calendar.days.len(), 29);
        assert_eq!(calendar.days[9].completions, 1);
        assert!(calendar.days[10].is_future);
        assert!(!calendar.days[9].is_future);
        assert!((calendar.completion_rate - 0.1).abs() < 1e-9);
        assert!(MonthCalendar::new(&ledger, 2024, 13, today).is_none());

        // 2024-02-01 was a Thursday.
        assert_eq!(calendar.leading_blanks(false), 3);
        assert_eq!(calendar.leading_blanks(true), 4);
    }

    #[test]
    fn report_reflects_habit_state() {
        let mut habit = Habit::new("Journal").with_streak_warning("Don't miss twice.");
        let today = DayKey::parse("2025-12-01").unwrap();
        habit.completed_days.insert(today.offset(-2).unwrap());
        let report = HabitReport::new(&habit, today);
        assert!(report.in_recovery_mode);
        assert!(report.streak_at_risk);
        assert_eq!(report.current_streak, 0);
        assert_eq!(report.response_level, "Gateway (2 min)");
        assert_eq!(report.streak_warning.as_deref(), Some("Don't miss twice."));
    }

    #[test]
    fn summary_counts_active_only() {
        let mut ledger = HabitLedger::new();
        let today = DayKey::parse("2025-12-01").unwrap();
        let mut done = Habit::new("Read");
        done.completed_days.insert(today);
        let mut archived = Habit::new("Old");
        archived.is_archived = true;
        ledger.add_habit(done);
        ledger.add_habit(archived);
        ledger.add_habit(Habit::new("Meditate"));

        let summary = DailySummary::new(&ledger, today);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.level_title, "Beginner");
    }
}

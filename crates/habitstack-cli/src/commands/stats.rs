use chrono::Datelike;
use clap::Subcommand;
use habitstack_core::{DailySummary, HabitReport, MonthCalendar, RateBand};
use serde::Serialize;

use super::{day_or_today, not_found, parse_id, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's summary
    Today {
        /// Report as of this day (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,
    },
    /// Month calendar with daily completion counts
    Calendar {
        /// Year (default: current)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (default: current)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Report for one habit
    Habit {
        /// Habit ID
        id: String,
    },
}

#[derive(Serialize)]
struct CalendarView {
    #[serde(flatten)]
    calendar: MonthCalendar,
    leading_blanks: u32,
    week_start: String,
}

pub fn run(action: StatsAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        StatsAction::Today { day } => {
            let today = day_or_today(day.as_deref())?;
            session.ledger.update_streak(today);
            session.save();
            print_json(&DailySummary::new(&session.ledger, today))?;
        }
        StatsAction::Calendar { year, month } => {
            let today = day_or_today(None)?;
            let year = year.unwrap_or_else(|| today.date().year());
            let month = month.unwrap_or_else(|| today.date().month());
            let calendar = MonthCalendar::new(&session.ledger, year, month, today)
                .ok_or_else(|| format!("invalid month: {year}-{month}"))?;
            let display = &session.config.display;
            print_json(&CalendarView {
                leading_blanks: calendar.leading_blanks(display.week_starts_sunday()),
                week_start: display.week_start.to_ascii_lowercase(),
                calendar,
            })?;
        }
        StatsAction::Habit { id } => {
            let today = day_or_today(None)?;
            let id = parse_id("habit", &id)?;
            let habit = session.ledger.habit(id).ok_or_else(|| not_found("habit", id))?;
            let report = HabitReport::new(habit, today);
            let display = &session.config.display;
            let band = RateBand::classify(
                report.weekly_completion_rate,
                display.rate_good_threshold,
                display.rate_fair_threshold,
            );
            print_json(&serde_json::json!({
                "report": report,
                "weekly_band": band,
                "compound_growth_days": habit.compound_growth_days(today.date()),
                "compound_growth_multiplier": habit.compound_growth_multiplier(today.date()),
            }))?;
        }
    }
    Ok(())
}

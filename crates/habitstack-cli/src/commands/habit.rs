//! Habit management and daily check-ins.

use clap::{Subcommand, ValueEnum};
use habitstack_core::habit::Habit;
use habitstack_core::{HabitReport, HabitType, RateBand};
use serde::Serialize;

use super::{day_or_today, not_found, parse_id, parse_time, print_json, today, CmdResult, Session};

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// A habit to build
    Build,
    /// A habit to break
    Break,
}

impl From<KindArg> for HabitType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Build => HabitType::Build,
            KindArg::Break => HabitType::BreakBad,
        }
    }
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with today's status
    List {
        /// Show archived habits instead of active ones
        #[arg(long)]
        archived: bool,
    },
    /// Show one habit in full
    Show {
        /// Habit ID
        id: String,
    },
    /// Create a habit
    Add {
        /// Habit name
        name: String,
        /// Icon name
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum, default_value = "build")]
        kind: KindArg,
        /// Cue time (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Cue location
        #[arg(long)]
        location: Option<String>,
        /// Existing habit to stack after
        #[arg(long)]
        after: Option<String>,
        /// Two-minute version
        #[arg(long)]
        two_minute: Option<String>,
        /// Message shown while the streak is at risk
        #[arg(long)]
        warning: Option<String>,
        /// Reminder time (HH:MM)
        #[arg(long)]
        reminder: Option<String>,
    },
    /// Update fields of a habit
    Update {
        /// Habit ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        motivation: Option<String>,
        #[arg(long)]
        two_minute: Option<String>,
        #[arg(long)]
        five_minute: Option<String>,
        #[arg(long)]
        ten_minute: Option<String>,
        #[arg(long)]
        full: Option<String>,
        /// Immediate reward after completing
        #[arg(long)]
        reward: Option<String>,
        #[arg(long)]
        warning: Option<String>,
        #[arg(long)]
        reminder: Option<String>,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
    /// Hide a habit from the active list
    Archive {
        /// Habit ID
        id: String,
    },
    /// Restore an archived habit
    Unarchive {
        /// Habit ID
        id: String,
    },
    /// Toggle completion for a day (default: today)
    Toggle {
        /// Habit ID
        id: String,
        /// Day (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,
    },
    /// Move to the next two-minute-rule level
    LevelUp {
        /// Habit ID
        id: String,
    },
}

#[derive(Serialize)]
struct HabitRow {
    #[serde(flatten)]
    report: HabitReport,
    weekly_band: RateBand,
}

#[derive(Serialize)]
struct HabitDetail<'a> {
    #[serde(flatten)]
    habit: &'a Habit,
    report: HabitReport,
    identity_statement: Option<String>,
    compound_growth_multiplier: f64,
}

pub fn run(action: HabitAction) -> CmdResult {
    let mut session = Session::open()?;
    let today = today();

    match action {
        HabitAction::List { archived } => {
            let display = &session.config.display;
            let rows: Vec<HabitRow> = session
                .ledger
                .habits
                .iter()
                .filter(|h| h.is_archived == archived)
                .map(|h| {
                    let report = HabitReport::new(h, today);
                    let weekly_band = RateBand::classify(
                        report.weekly_completion_rate,
                        display.rate_good_threshold,
                        display.rate_fair_threshold,
                    );
                    HabitRow { report, weekly_band }
                })
                .collect();
            print_json(&rows)?;
        }
        HabitAction::Show { id } => {
            let id = parse_id("habit", &id)?;
            let habit = session.ledger.habit(id).ok_or_else(|| not_found("habit", id))?;
            print_json(&HabitDetail {
                habit,
                report: HabitReport::new(habit, today),
                identity_statement: habit.identity_statement(),
                compound_growth_multiplier: habit.compound_growth_multiplier(today.date()),
            })?;
        }
        HabitAction::Add {
            name,
            icon,
            description,
            kind,
            time,
            location,
            after,
            two_minute,
            warning,
            reminder,
        } => {
            if name.trim().is_empty() {
                return Err("habit name must not be blank".into());
            }
            let mut habit = Habit::new(name.trim());
            if let Some(icon) = icon {
                habit.icon = icon;
            }
            if let Some(description) = description {
                habit.description = description;
            }
            habit.habit_type = kind.into();
            habit.cue.time = time.as_deref().map(parse_time).transpose()?;
            habit.cue.location = location.unwrap_or_default();
            habit.cue.current_habit = after.unwrap_or_default();
            habit.response.two_minute = two_minute.unwrap_or_else(|| habit.name.clone());
            habit.response.full = habit.name.clone();
            habit.streak_warning = warning;
            habit.reminder_time = reminder.as_deref().map(parse_time).transpose()?;

            session.ledger.add_habit(habit.clone());
            session.save();
            print_json(&habit)?;
        }
        HabitAction::Update {
            id,
            name,
            icon,
            description,
            time,
            location,
            after,
            motivation,
            two_minute,
            five_minute,
            ten_minute,
            full,
            reward,
            warning,
            reminder,
        } => {
            let id = parse_id("habit", &id)?;
            let mut habit = session
                .ledger
                .habit(id)
                .cloned()
                .ok_or_else(|| not_found("habit", id))?;

            if let Some(n) = name {
                if n.trim().is_empty() {
                    return Err("habit name must not be blank".into());
                }
                habit.name = n.trim().to_string();
            }
            if let Some(i) = icon {
                habit.icon = i;
            }
            if let Some(d) = description {
                habit.description = d;
            }
            if let Some(t) = time {
                habit.cue.time = Some(parse_time(&t)?);
            }
            if let Some(l) = location {
                habit.cue.location = l;
            }
            if let Some(a) = after {
                habit.cue.current_habit = a;
            }
            if let Some(m) = motivation {
                habit.craving.motivation = m;
            }
            if let Some(v) = two_minute {
                habit.response.two_minute = v;
            }
            if let Some(v) = five_minute {
                habit.response.five_minute = v;
            }
            if let Some(v) = ten_minute {
                habit.response.ten_minute = v;
            }
            if let Some(v) = full {
                habit.response.full = v;
            }
            if let Some(r) = reward {
                habit.reward_plan.immediate_reward = r;
            }
            if let Some(w) = warning {
                habit.streak_warning = Some(w);
            }
            if let Some(r) = reminder {
                habit.reminder_time = Some(parse_time(&r)?);
            }

            session.ledger.update_habit(habit.clone());
            session.save();
            print_json(&habit)?;
        }
        HabitAction::Delete { id } => {
            let id = parse_id("habit", &id)?;
            if !session.ledger.delete_habit(id) {
                return Err(not_found("habit", id));
            }
            session.ledger.update_streak(today);
            session.save();
            println!("Habit deleted: {id}");
        }
        HabitAction::Archive { id } => {
            let id = parse_id("habit", &id)?;
            if !session.ledger.archive_habit(id) {
                return Err(not_found("habit", id));
            }
            session.ledger.update_streak(today);
            session.save();
            println!("Habit archived: {id}");
        }
        HabitAction::Unarchive { id } => {
            let id = parse_id("habit", &id)?;
            if !session.ledger.unarchive_habit(id) {
                return Err(not_found("habit", id));
            }
            session.ledger.update_streak(today);
            session.save();
            println!("Habit restored: {id}");
        }
        HabitAction::Toggle { id, day } => {
            let id = parse_id("habit", &id)?;
            let day = day_or_today(day.as_deref())?;
            let outcome = session
                .ledger
                .toggle_completion(id, day, today)
                .ok_or_else(|| not_found("habit", id))?;
            session.save();
            print_json(&outcome)?;
        }
        HabitAction::LevelUp { id } => {
            let id = parse_id("habit", &id)?;
            let moved = session
                .ledger
                .level_up_response(id)
                .ok_or_else(|| not_found("habit", id))?;
            session.save();
            let habit = session.ledger.habit(id).ok_or_else(|| not_found("habit", id))?;
            print_json(&serde_json::json!({
                "id": id,
                "leveled_up": moved,
                "level": habit.response.level_name(),
                "current_version": habit.response.current_version_name(),
            }))?;
        }
    }
    Ok(())
}

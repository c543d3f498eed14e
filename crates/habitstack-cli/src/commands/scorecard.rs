use chrono::Utc;
use clap::Subcommand;
use habitstack_core::{BehaviorCategory, BehaviorRating, ScorecardBehavior};

use super::{not_found, parse_id, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum ScorecardAction {
    /// List behaviors grouped by time of day
    List,
    /// Add a behavior
    Add {
        /// What you do
        behavior: String,
        /// Rating: +, = or -
        #[arg(long, default_value = "=", allow_hyphen_values = true)]
        rating: String,
        /// Category (morning, afternoon, evening, work, home, social, other)
        #[arg(long, default_value = "morning")]
        category: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update a behavior
    Update {
        /// Behavior ID
        id: String,
        #[arg(long)]
        behavior: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        rating: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a behavior
    Delete {
        /// Behavior ID
        id: String,
    },
    /// Mark a behavior as turned into a habit
    Link {
        /// Behavior ID
        id: String,
        /// Habit ID
        habit_id: String,
    },
    /// Record that the scorecard was reviewed now
    Review,
    /// Counts, balance score and candidates
    Summary,
}

fn parse_rating(raw: &str) -> Result<BehaviorRating, Box<dyn std::error::Error>> {
    BehaviorRating::parse(raw).ok_or_else(|| format!("unknown rating: {raw} (use +, = or -)").into())
}

fn parse_category(raw: &str) -> Result<BehaviorCategory, Box<dyn std::error::Error>> {
    BehaviorCategory::parse(raw).ok_or_else(|| format!("unknown behavior category: {raw}").into())
}

pub fn run(action: ScorecardAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        ScorecardAction::List => {
            print_json(&session.ledger.scorecard.by_category())?;
        }
        ScorecardAction::Add {
            behavior,
            rating,
            category,
            notes,
        } => {
            if behavior.trim().is_empty() {
                return Err("behavior must not be blank".into());
            }
            let mut entry =
                ScorecardBehavior::new(behavior.trim(), parse_rating(&rating)?, parse_category(&category)?);
            entry.notes = notes.unwrap_or_default();
            session.ledger.add_behavior(entry.clone());
            session.save();
            print_json(&entry)?;
        }
        ScorecardAction::Update {
            id,
            behavior,
            rating,
            category,
            notes,
        } => {
            let id = parse_id("behavior", &id)?;
            let mut entry = session
                .ledger
                .scorecard
                .behaviors
                .iter()
                .find(|b| b.id == id)
                .cloned()
                .ok_or_else(|| not_found("behavior", id))?;
            if let Some(b) = behavior {
                entry.behavior = b;
            }
            if let Some(r) = rating {
                entry.rating = parse_rating(&r)?;
            }
            if let Some(c) = category {
                entry.category = parse_category(&c)?;
            }
            if let Some(n) = notes {
                entry.notes = n;
            }
            session.ledger.update_behavior(entry.clone());
            session.save();
            print_json(&entry)?;
        }
        ScorecardAction::Delete { id } => {
            let id = parse_id("behavior", &id)?;
            if !session.ledger.delete_behavior(id) {
                return Err(not_found("behavior", id));
            }
            session.save();
            println!("Behavior deleted: {id}");
        }
        ScorecardAction::Link { id, habit_id } => {
            let id = parse_id("behavior", &id)?;
            let habit_id = parse_id("habit", &habit_id)?;
            if session.ledger.habit(habit_id).is_none() {
                return Err(not_found("habit", habit_id));
            }
            if !session.ledger.link_behavior_to_habit(id, habit_id) {
                return Err(not_found("behavior", id));
            }
            session.save();
            println!("Behavior {id} linked to habit {habit_id}");
        }
        ScorecardAction::Review => {
            session.ledger.mark_scorecard_reviewed(Utc::now());
            session.save();
            println!("Scorecard reviewed");
        }
        ScorecardAction::Summary => {
            let card = &session.ledger.scorecard;
            print_json(&serde_json::json!({
                "positive": card.positive_count(),
                "neutral": card.neutral_count(),
                "negative": card.negative_count(),
                "balance_score": card.balance_score(),
                "last_review_date": card.last_review_date,
                "habit_candidates": card.habit_candidates(),
                "breaking_candidates": card.breaking_candidates(),
            }))?;
        }
    }
    Ok(())
}

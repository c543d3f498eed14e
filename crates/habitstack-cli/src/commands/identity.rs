use clap::Subcommand;
use habitstack_core::{IdentityCategory, IdentityStatement, IdentityStrength};
use serde::Serialize;

use super::{not_found, parse_id, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum IdentityAction {
    /// List identity statements with their strength
    List,
    /// Add an identity statement ("I am ...")
    Add {
        /// Statement, without the leading "I am"
        statement: String,
        /// Category (e.g. health, learning, other)
        #[arg(long, default_value = "other")]
        category: String,
        /// Habit ID to link
        #[arg(long)]
        habit: Option<String>,
    },
    /// Delete an identity statement
    Delete {
        /// Identity ID
        id: String,
    },
    /// Cast a vote by hand
    Vote {
        /// Identity ID
        id: String,
    },
    /// Link an identity to a habit
    Link {
        /// Identity ID
        id: String,
        /// Habit ID
        habit_id: String,
    },
    /// List categories with suggested statements
    Categories,
}

#[derive(Serialize)]
struct IdentityView<'a> {
    #[serde(flatten)]
    identity: &'a IdentityStatement,
    full_statement: String,
    strength: &'static str,
    strength_description: &'static str,
    strength_progress: f64,
}

impl<'a> IdentityView<'a> {
    fn new(identity: &'a IdentityStatement) -> Self {
        let strength: IdentityStrength = identity.strength();
        Self {
            identity,
            full_statement: identity.full_statement(),
            strength: strength.label(),
            strength_description: strength.description(),
            strength_progress: strength.progress(),
        }
    }
}

#[derive(Serialize)]
struct CategoryView {
    category: IdentityCategory,
    name: &'static str,
    suggestions: &'static [&'static str],
}

fn parse_category(raw: &str) -> Result<IdentityCategory, Box<dyn std::error::Error>> {
    IdentityCategory::parse(raw).ok_or_else(|| format!("unknown identity category: {raw}").into())
}

pub fn run(action: IdentityAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        IdentityAction::List => {
            let views: Vec<IdentityView> = session
                .ledger
                .profile
                .identity_statements
                .iter()
                .map(IdentityView::new)
                .collect();
            print_json(&views)?;
        }
        IdentityAction::Add {
            statement,
            category,
            habit,
        } => {
            if statement.trim().is_empty() {
                return Err("identity statement must not be blank".into());
            }
            let category = parse_category(&category)?;
            let mut identity = IdentityStatement::new(statement.trim(), category);
            if let Some(raw) = habit {
                let habit_id = parse_id("habit", &raw)?;
                if session.ledger.habit(habit_id).is_none() {
                    return Err(not_found("habit", habit_id));
                }
                identity = identity.linked_to(habit_id);
            }
            session.ledger.add_identity_statement(identity.clone());
            session.save();
            print_json(&IdentityView::new(&identity))?;
        }
        IdentityAction::Delete { id } => {
            let id = parse_id("identity", &id)?;
            if !session.ledger.delete_identity_statement(id) {
                return Err(not_found("identity", id));
            }
            session.save();
            println!("Identity deleted: {id}");
        }
        IdentityAction::Vote { id } => {
            let id = parse_id("identity", &id)?;
            if !session.ledger.vote_for_identity(id) {
                return Err(not_found("identity", id));
            }
            session.save();
            println!("Vote cast for identity: {id}");
        }
        IdentityAction::Link { id, habit_id } => {
            let id = parse_id("identity", &id)?;
            let habit_id = parse_id("habit", &habit_id)?;
            if session.ledger.habit(habit_id).is_none() {
                return Err(not_found("habit", habit_id));
            }
            if !session.ledger.link_identity_to_habit(id, habit_id) {
                return Err(not_found("identity", id));
            }
            session.save();
            println!("Identity {id} linked to habit {habit_id}");
        }
        IdentityAction::Categories => {
            let views: Vec<CategoryView> = IdentityCategory::ALL
                .into_iter()
                .map(|category| CategoryView {
                    category,
                    name: category.display_name(),
                    suggestions: category.suggestions(),
                })
                .collect();
            print_json(&views)?;
        }
    }
    Ok(())
}

//! Profile commands.

use clap::Subcommand;
use habitstack_core::UserProfile;
use serde::Serialize;

use super::{print_json, today, CmdResult, Session};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile with level and growth
    Show,
    /// Change the display name
    Rename {
        /// New name
        name: String,
    },
    /// Clear all progress (keeps name, habits and identities)
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Serialize)]
struct ProfileView<'a> {
    #[serde(flatten)]
    profile: &'a UserProfile,
    level: u32,
    level_title: &'static str,
    level_progress: f64,
    completions_to_next_level: u32,
    quote: &'static str,
    primary_identity: Option<String>,
    compound_growth: String,
}

impl<'a> ProfileView<'a> {
    fn new(profile: &'a UserProfile) -> Self {
        Self {
            profile,
            level: profile.level().number,
            level_title: profile.level_title(),
            level_progress: profile.level_progress(),
            completions_to_next_level: profile.completions_to_next_level(),
            quote: profile.current_quote(),
            primary_identity: profile.primary_identity().map(|i| i.full_statement()),
            compound_growth: profile.compound_growth_message(),
        }
    }
}

pub fn run(action: ProfileAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        ProfileAction::Show => {
            session.ledger.update_streak(today());
            session.save();
            print_json(&ProfileView::new(&session.ledger.profile))?;
        }
        ProfileAction::Rename { name } => {
            if name.trim().is_empty() {
                return Err("name must not be blank".into());
            }
            session.ledger.rename_user(name.trim());
            session.save();
            println!("Profile renamed: {}", session.ledger.profile.name);
        }
        ProfileAction::Reset { yes } => {
            if !yes {
                return Err("refusing to reset progress without --yes".into());
            }
            session.ledger.reset_progress();
            session.save();
            println!("Progress reset");
        }
    }
    Ok(())
}

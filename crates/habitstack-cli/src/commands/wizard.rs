//! Non-interactive front end for the new-habit wizard.
//!
//! All answers arrive as flags; the wizard is still driven step by step so
//! the same gates apply as in an interactive flow.

use clap::{Args, Subcommand};
use habitstack_core::wizard::ICONS;
use habitstack_core::{NewHabitWizard, WizardStep};
use serde::Serialize;

use super::habit::KindArg;
use super::{parse_time, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum WizardAction {
    /// Create a habit through the four steps
    Create(CreateArgs),
    /// List the wizard steps
    Steps,
    /// List available icons
    Icons,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Habit name
    name: String,
    #[arg(long)]
    icon: Option<String>,
    #[arg(long, value_enum, default_value = "build")]
    kind: KindArg,

    /// Identity statement ("a reader"); creates a linked identity
    #[arg(long)]
    identity: Option<String>,
    #[arg(long)]
    motivation: Option<String>,
    /// Pair the habit with something you enjoy
    #[arg(long)]
    bundle: Option<String>,

    /// Cue time (HH:MM)
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Existing habit to stack after
    #[arg(long)]
    after: Option<String>,

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
    /// Turn off never-miss-twice tracking
    #[arg(long)]
    allow_misses: bool,
}

#[derive(Serialize)]
struct StepView {
    index: usize,
    step: WizardStep,
    title: &'static str,
}

fn fill(wizard: &mut NewHabitWizard, args: CreateArgs) -> Result<(), Box<dyn std::error::Error>> {
    wizard.name = args.name;
    if let Some(icon) = args.icon {
        wizard.icon = icon;
    }
    wizard.habit_type = args.kind.into();
    wizard.identity_statement = args.identity.unwrap_or_default();
    wizard.motivation = args.motivation.unwrap_or_default();
    wizard.temptation_bundle = args.bundle.unwrap_or_default();
    wizard.cue_time = args.time.as_deref().map(parse_time).transpose()?;
    wizard.cue_location = args.location.unwrap_or_default();
    wizard.current_habit = args.after.unwrap_or_default();
    wizard.two_minute = args.two_minute.unwrap_or_default();
    wizard.five_minute = args.five_minute.unwrap_or_default();
    wizard.ten_minute = args.ten_minute.unwrap_or_default();
    wizard.full = args.full.unwrap_or_default();
    wizard.immediate_reward = args.reward.unwrap_or_default();
    wizard.never_miss_twice = !args.allow_misses;
    Ok(())
}

pub fn run(action: WizardAction) -> CmdResult {
    match action {
        WizardAction::Create(args) => {
            let mut wizard = NewHabitWizard::new();
            fill(&mut wizard, args)?;
            while !wizard.is_last_step() {
                wizard.advance()?;
            }
            let output = wizard.finish()?;

            let mut session = Session::open()?;
            session.ledger.add_habit(output.habit.clone());
            if let Some(identity) = output.identity.clone() {
                session.ledger.add_identity_statement(identity);
            }
            session.save();
            print_json(&serde_json::json!({
                "habit": output.habit,
                "identity": output.identity,
            }))?;
        }
        WizardAction::Steps => {
            let steps: Vec<StepView> = [
                WizardStep::Identity,
                WizardStep::Cue,
                WizardStep::Response,
                WizardStep::Reward,
            ]
            .into_iter()
            .map(|step| StepView {
                index: step.index(),
                step,
                title: step.title(),
            })
            .collect();
            print_json(&steps)?;
        }
        WizardAction::Icons => {
            print_json(&ICONS)?;
        }
    }
    Ok(())
}

use chrono::Utc;
use clap::Subcommand;
use habitstack_core::experiment::DEFAULT_DURATION_DAYS;
use habitstack_core::Experiment;
use serde::Serialize;

use super::{not_found, parse_id, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum ExperimentAction {
    /// List experiments
    List {
        /// Only running experiments
        #[arg(long)]
        active: bool,
    },
    /// Show an experiment with its notes
    Show {
        /// Experiment ID
        id: String,
    },
    /// Create and start an experiment
    Add {
        /// Experiment name
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Length in days
        #[arg(long, default_value_t = DEFAULT_DURATION_DAYS)]
        days: u32,
    },
    /// Restart an experiment from now
    Start {
        /// Experiment ID
        id: String,
    },
    /// Stop an experiment
    End {
        /// Experiment ID
        id: String,
    },
    /// Delete an experiment
    Delete {
        /// Experiment ID
        id: String,
    },
    /// Attach a note to an experiment
    Note {
        /// Experiment ID
        id: String,
        /// Note text
        text: String,
    },
}

#[derive(Serialize)]
struct ExperimentView<'a> {
    #[serde(flatten)]
    experiment: &'a Experiment,
    days_remaining: u32,
    progress: f64,
    is_completed: bool,
}

impl<'a> ExperimentView<'a> {
    fn new(experiment: &'a Experiment, now: chrono::DateTime<Utc>) -> Self {
        Self {
            experiment,
            days_remaining: experiment.days_remaining(now),
            progress: experiment.progress(now),
            is_completed: experiment.is_completed(now),
        }
    }
}

pub fn run(action: ExperimentAction) -> CmdResult {
    let mut session = Session::open()?;
    let now = Utc::now();

    match action {
        ExperimentAction::List { active } => {
            let views: Vec<ExperimentView> = session
                .ledger
                .experiments
                .iter()
                .filter(|e| !active || e.is_active)
                .map(|e| ExperimentView::new(e, now))
                .collect();
            print_json(&views)?;
        }
        ExperimentAction::Show { id } => {
            let id = parse_id("experiment", &id)?;
            let experiment = session
                .ledger
                .experiment(id)
                .ok_or_else(|| not_found("experiment", id))?;
            print_json(&ExperimentView::new(experiment, now))?;
        }
        ExperimentAction::Add {
            name,
            description,
            days,
        } => {
            if name.trim().is_empty() {
                return Err("experiment name must not be blank".into());
            }
            let experiment = Experiment::new(name.trim(), description, days, now);
            session.ledger.add_experiment(experiment.clone());
            session.save();
            print_json(&ExperimentView::new(&experiment, now))?;
        }
        ExperimentAction::Start { id } => {
            let id = parse_id("experiment", &id)?;
            if !session.ledger.start_experiment(id, now) {
                return Err(not_found("experiment", id));
            }
            session.save();
            println!("Experiment started: {id}");
        }
        ExperimentAction::End { id } => {
            let id = parse_id("experiment", &id)?;
            if !session.ledger.end_experiment(id) {
                return Err(not_found("experiment", id));
            }
            session.save();
            println!("Experiment ended: {id}");
        }
        ExperimentAction::Delete { id } => {
            let id = parse_id("experiment", &id)?;
            if !session.ledger.delete_experiment(id) {
                return Err(not_found("experiment", id));
            }
            session.save();
            println!("Experiment deleted: {id}");
        }
        ExperimentAction::Note { id, text } => {
            let id = parse_id("experiment", &id)?;
            if !session.ledger.add_experiment_note(id, text, now) {
                return Err(not_found("experiment", id));
            }
            session.save();
            println!("Note added to experiment: {id}");
        }
    }
    Ok(())
}

use clap::Subcommand;
use habitstack_core::Reward;
use serde::Serialize;

use super::{not_found, parse_id, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum RewardAction {
    /// List rewards with their progress
    List {
        /// Only unlocked rewards
        #[arg(long)]
        unlocked: bool,
    },
    /// Create a reward
    Add {
        /// Reward name
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Points needed to unlock
        #[arg(long, default_value_t = 5)]
        points: u32,
    },
    /// Update a reward
    Update {
        /// Reward ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// New unlock threshold
        #[arg(long)]
        points: Option<u32>,
    },
    /// Delete a reward
    Delete {
        /// Reward ID
        id: String,
    },
    /// Spend an unlocked reward
    Redeem {
        /// Reward ID
        id: String,
        /// Redeem even if still locked
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct RewardRow<'a> {
    #[serde(flatten)]
    reward: &'a Reward,
    progress: f64,
}

pub fn run(action: RewardAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        RewardAction::List { unlocked } => {
            let rows: Vec<RewardRow> = session
                .ledger
                .rewards
                .iter()
                .filter(|r| !unlocked || r.is_unlocked())
                .map(|reward| RewardRow {
                    reward,
                    progress: reward.progress(),
                })
                .collect();
            print_json(&rows)?;
        }
        RewardAction::Add {
            name,
            description,
            points,
        } => {
            if name.trim().is_empty() {
                return Err("reward name must not be blank".into());
            }
            let reward = Reward::new(name.trim(), description, points);
            session.ledger.add_reward(reward.clone());
            session.save();
            print_json(&reward)?;
        }
        RewardAction::Update {
            id,
            name,
            description,
            points,
        } => {
            let id = parse_id("reward", &id)?;
            let mut reward = session
                .ledger
                .reward(id)
                .cloned()
                .ok_or_else(|| not_found("reward", id))?;
            if let Some(n) = name {
                reward.name = n;
            }
            if let Some(d) = description {
                reward.description = d;
            }
            if let Some(p) = points {
                reward.set_points_required(p);
            }
            session.ledger.update_reward(reward.clone());
            session.save();
            print_json(&reward)?;
        }
        RewardAction::Delete { id } => {
            let id = parse_id("reward", &id)?;
            if !session.ledger.delete_reward(id) {
                return Err(not_found("reward", id));
            }
            session.save();
            println!("Reward deleted: {id}");
        }
        RewardAction::Redeem { id, force } => {
            let id = parse_id("reward", &id)?;
            let reward = session.ledger.reward(id).ok_or_else(|| not_found("reward", id))?;
            if !reward.is_unlocked() && !force {
                return Err(format!(
                    "reward is locked: {}/{} points",
                    reward.points_earned, reward.points_required
                )
                .into());
            }
            session.ledger.redeem_reward(id);
            session.save();
            println!("Reward redeemed: {id}");
        }
    }
    Ok(())
}

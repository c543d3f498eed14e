use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitstack-cli", version, about = "Habitstack CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habits and daily check-ins
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Point-gated rewards
    Reward {
        #[command(subcommand)]
        action: commands::reward::RewardAction,
    },
    /// Time-boxed habit experiments
    Experiment {
        #[command(subcommand)]
        action: commands::experiment::ExperimentAction,
    },
    /// User profile and level
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Identity statements
    Identity {
        #[command(subcommand)]
        action: commands::identity::IdentityAction,
    },
    /// Habits scorecard
    Scorecard {
        #[command(subcommand)]
        action: commands::scorecard::ScorecardAction,
    },
    /// Progress reports
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Guided habit creation
    Wizard {
        #[command(subcommand)]
        action: commands::wizard::WizardAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Reward { action } => commands::reward::run(action),
        Commands::Experiment { action } => commands::experiment::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Identity { action } => commands::identity::run(action),
        Commands::Scorecard { action } => commands::scorecard::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Wizard { action } => commands::wizard::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

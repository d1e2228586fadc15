use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "banafit", version, about = "BanaFit CLI")]
struct Cli {
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, hide = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register, log in, onboarding and profile
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Workout and diet plan
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Tick exercises, complete days, view the streak
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Earn diamonds
    Diamonds {
        #[command(subcommand)]
        action: commands::diamonds::DiamondsAction,
    },
    /// Cosmetic shop and inventory
    Shop {
        #[command(subcommand)]
        action: commands::shop::ShopAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = cli.today;
    let result = match cli.command {
        Commands::Account { action } => commands::account::run(action, today),
        Commands::Plan { action } => commands::plan::run(action, today),
        Commands::Workout { action } => commands::workout::run(action, today),
        Commands::Diamonds { action } => commands::diamonds::run(action, today),
        Commands::Shop { action } => commands::shop::run(action, today),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

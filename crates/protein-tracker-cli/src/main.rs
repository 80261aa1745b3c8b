use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "protein-tracker", version, about = "Daily protein drink tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's status and toggling
    Today {
        #[command(subcommand)]
        action: commands::today::TodayAction,
    },
    /// Streaks, history and calendar
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Write a snapshot of history and statistics
    Export(commands::export::ExportArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// UI theme preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today { action } => commands::today::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Export(args) => commands::export::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Theme { action } => commands::theme::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

//! datamon CLI — terminal front end for the datamon quiz games.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod render;

#[derive(Parser)]
#[command(name = "datamon", version, about = "Math and memory quiz games for kids")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (reads commands from stdin)
    Play {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Memory-bank data file
        #[arg(long)]
        data_path: Option<PathBuf>,

        /// Seed for reproducible problems and secrets
        #[arg(long)]
        seed: Option<u64>,

        /// Player name
        #[arg(long)]
        player: Option<String>,
    },

    /// Manage memory-bank problems (parent view)
    Bank {
        #[command(subcommand)]
        action: BankAction,

        /// Config file path
        #[arg(long, global = true)]
        config: Option<PathBuf>,

        /// Memory-bank data file
        #[arg(long, global = true)]
        data_path: Option<PathBuf>,
    },

    /// Create a starter datamon.toml
    Init,
}

#[derive(Subcommand)]
pub enum BankAction {
    /// Add a problem for a student
    Add(commands::bank::NewProblem),

    /// Show all stored problems
    List,

    /// Delete all stored problems
    Clear,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("datamon=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            config,
            data_path,
            seed,
            player,
        } => commands::play::execute(config, data_path, seed, player),
        Commands::Bank {
            action,
            config,
            data_path,
        } => commands::bank::execute(action, config, data_path),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

//! Arcade CLI - grid games, roulette sessions, and arena matches between
//! adaptive heuristic agents
//!
//! - `grid`: Connect Four / Tic-Tac-Toe episodes between baseline movers
//! - `roulette`: a betting session with session statistics and CSV export
//! - `arena`: matches between two agents, with persisted learned state
//! - `agents`: the agent registry and persisted metrics

use std::path::PathBuf;

use anyhow::{Context, Result};
use arcade::{
    app::{App, AppConfig},
    cli::commands::{agents, arena, grid, roulette},
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcade")]
#[command(version, about = "Grid games, roulette, and adaptive arena agents", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play Connect Four or Tic-Tac-Toe episodes
    Grid(grid::GridArgs),

    /// Run a roulette session
    Roulette(roulette::RouletteArgs),

    /// Stage matches between two agents
    Arena(arena::ArenaArgs),

    /// List agents and persisted metrics
    Agents(agents::AgentsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    let app = App::with_config(config);

    match cli.command {
        Commands::Grid(args) => grid::execute(args, &app),
        Commands::Roulette(args) => roulette::execute(args, &app),
        Commands::Arena(args) => arena::execute(args, &app),
        Commands::Agents(args) => agents::execute(args, &app),
    }
}

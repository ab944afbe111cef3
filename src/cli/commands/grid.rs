//! Grid command - play Connect Four or Tic-Tac-Toe between baseline movers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    app::App,
    cli::output::{create_progress, print_kv, print_section},
    grid::{GreedyMover, GridEnv, GridMover, GridRules, RandomMover},
    pipeline::{EpisodeRunner, GridTally},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameChoice {
    ConnectFour,
    TicTacToe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MoverChoice {
    Random,
    Greedy,
}

#[derive(Parser, Debug)]
#[command(about = "Play grid game episodes between baseline movers")]
pub struct GridArgs {
    #[arg(long, value_enum, default_value = "connect-four")]
    pub game: GameChoice,

    /// Number of episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Mover for the first player
    #[arg(long, value_enum, default_value = "greedy")]
    pub mover: MoverChoice,

    /// Mover for the second player
    #[arg(long, value_enum, default_value = "random")]
    pub opponent: MoverChoice,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the final board of the last episode
    #[arg(long)]
    pub render: bool,

    /// Save the outcome tally as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Either baseline mover
enum Mover {
    Random(RandomMover),
    Greedy(GreedyMover),
}

impl Mover {
    fn new(choice: MoverChoice, seed: Option<u64>) -> Self {
        match choice {
            MoverChoice::Random => Mover::Random(RandomMover::new(seed)),
            MoverChoice::Greedy => Mover::Greedy(GreedyMover::new(seed)),
        }
    }
}

impl GridMover for Mover {
    fn choose<R: GridRules>(&mut self, env: &GridEnv<R>) -> Option<usize> {
        match self {
            Mover::Random(mover) => mover.choose(env),
            Mover::Greedy(mover) => mover.choose(env),
        }
    }
}

pub fn execute(args: GridArgs, app: &App) -> Result<()> {
    let seed = args.seed.or(app.config().seed);
    match args.game {
        GameChoice::ConnectFour => play(app.connect_four(), &args, seed),
        GameChoice::TicTacToe => play(app.tic_tac_toe(), &args, seed),
    }
}

fn play<R: GridRules>(mut env: GridEnv<R>, args: &GridArgs, seed: Option<u64>) -> Result<()> {
    let mut first = Mover::new(args.mover, seed);
    let mut second = Mover::new(args.opponent, seed.map(|s| s.wrapping_add(1)));
    let runner = EpisodeRunner::new();
    let mut tally = GridTally::default();
    let mut total_steps = 0;

    let progress = create_progress(args.episodes as u64, "episodes")?;
    for _ in 0..args.episodes {
        let summary = runner.run_grid(&mut env, None, &mut first, &mut second)?;
        total_steps += summary.steps;
        if let Some(result) = summary.result() {
            tally.record(result);
        }
        progress.inc(1);
        progress.set_message(format!(
            "A:{} B:{} D:{}",
            tally.first_wins, tally.second_wins, tally.draws
        ));
    }
    progress.finish();

    print_section(&format!("{:?}: {:?} vs {:?}", args.game, args.mover, args.opponent));
    print_kv("Episodes", &tally.episodes.to_string());
    print_kv(
        "First player wins",
        &format!("{} ({:.1}%)", tally.first_wins, tally.first_win_rate() * 100.0),
    );
    print_kv(
        "Second player wins",
        &format!("{} ({:.1}%)", tally.second_wins, tally.second_win_rate() * 100.0),
    );
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", tally.draws, tally.draw_rate() * 100.0),
    );
    print_kv("Forfeits", &tally.forfeits.to_string());
    if tally.episodes > 0 {
        print_kv(
            "Average moves",
            &format!("{:.1}", total_steps as f64 / tally.episodes as f64),
        );
    }

    if args.render {
        println!("\n{}", env.render_text());
    }
    if let Some(path) = &args.export {
        tally
            .save(path)
            .with_context(|| format!("failed to save tally to {}", path.display()))?;
        println!("\n✓ Tally exported to: {}", path.display());
    }
    Ok(())
}

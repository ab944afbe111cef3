//! Arena command - stage matches between two heuristic agents

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::ExperienceLog,
    agents::Policy,
    app::{App, AppConfig},
    cli::output::{MatchProgress, print_kv, print_section},
    export::CsvExporter,
    pipeline::Tournament,
};

#[derive(Parser, Debug)]
#[command(about = "Stage arena matches between two agents")]
pub struct ArenaArgs {
    /// Agent on the left side
    #[arg(long, short = 'l', default_value = "tracker")]
    pub left: String,

    /// Agent on the right side
    #[arg(long, short = 'r', default_value = "escalating")]
    pub right: String,

    /// Number of matches
    #[arg(long, short = 'm', default_value_t = 1)]
    pub matches: usize,

    /// Agent state file (overrides the configured path)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Save every experience record as JSON
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Save per-agent summaries as CSV
    #[arg(long)]
    pub summary_csv: Option<PathBuf>,

    /// Save the tournament result as JSON
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// Match time limit in seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Consecutive points that end a match (0 disables)
    #[arg(long)]
    pub streak: Option<u32>,

    /// Point total that ends a match
    #[arg(long)]
    pub points: Option<u32>,

    /// Balls in play at once
    #[arg(long)]
    pub balls: Option<usize>,

    /// Pace ticks at the configured rate
    #[arg(long)]
    pub realtime: bool,

    /// Do not write learned state back
    #[arg(long)]
    pub no_save: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

fn configure(args: &ArenaArgs, base: &AppConfig) -> AppConfig {
    let mut arena = base.arena.clone();
    if let Some(secs) = args.time_limit {
        arena = arena.with_time_limit(secs);
    }
    if let Some(streak) = args.streak {
        arena = arena.with_streak_to_win((streak > 0).then_some(streak));
    }
    if let Some(points) = args.points {
        arena = arena.with_points_to_win(Some(points));
    }
    if let Some(balls) = args.balls {
        arena = arena.with_balls(balls);
    }

    let mut config = base.clone().with_arena(arena);
    if let Some(path) = &args.state {
        config = config.with_state_path(path.clone());
    }
    if args.seed.is_some() {
        config = config.with_seed(args.seed);
    }
    config
}

pub fn execute(args: ArenaArgs, app: &App) -> Result<()> {
    let config = configure(&args, app.config());
    config.validate().context("invalid arena settings")?;
    let app = App::with_config(config);

    let mut roster = app.load_roster();
    let mut left = app.agent(&roster, &args.left)?;
    let mut right = app.agent(&roster, &args.right)?;

    print_section(&format!("{} vs {}", left.kind(), right.kind()));
    print_kv("Left IQ", &format!("{:.2}", left.iq()));
    print_kv("Right IQ", &format!("{:.2}", right.iq()));

    let log = Arc::new(Mutex::new(ExperienceLog::new()));
    let controller = app
        .match_controller()
        .with_realtime(args.realtime)
        .with_observer(Box::new(Arc::clone(&log)))
        .with_observer(Box::new(MatchProgress::new(args.matches)?));
    let result = Tournament::new(controller, args.matches).run(&mut left, &mut right)?;

    print_section("Tournament");
    print_kv("Matches", &result.matches.to_string());
    print_kv(
        "Left wins",
        &format!("{} ({:.1}%)", result.left_wins, result.left_win_rate * 100.0),
    );
    print_kv("Right wins", &result.right_wins.to_string());
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", result.draws, result.draw_rate * 100.0),
    );
    print_kv(
        "Points",
        &format!("{} - {}", result.left_points, result.right_points),
    );
    print_kv("Streak finishes", &result.streak_finishes.to_string());

    let log = log.lock().unwrap_or_else(PoisonError::into_inner);
    println!("\n{}", log.render_report());

    if let Some(path) = &args.log {
        log.save(path)
            .with_context(|| format!("failed to save experience log to {}", path.display()))?;
        println!("✓ Experience log saved to: {}", path.display());
    }
    if let Some(path) = &args.summary_csv {
        CsvExporter::write_summaries(path, &log.summaries())
            .with_context(|| format!("failed to export summaries to {}", path.display()))?;
        println!("✓ Summaries exported to: {}", path.display());
    }
    if let Some(path) = &args.results {
        result
            .save(path)
            .with_context(|| format!("failed to save results to {}", path.display()))?;
        println!("✓ Results saved to: {}", path.display());
    }

    if !args.no_save {
        roster.insert(left.kind().id(), left);
        roster.insert(right.kind().id(), right);
        app.save_roster(&roster).with_context(|| {
            format!(
                "failed to save agent state to {}",
                app.config().state_path.display()
            )
        })?;
        println!("✓ Agent state saved to: {}", app.config().state_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ArenaArgs,
    }

    #[test]
    fn test_zero_streak_disables_threshold() {
        let wrapper =
            Wrapper::parse_from(["arena", "--streak", "0", "--points", "3", "--seed", "9"]);
        let config = configure(&wrapper.args, &AppConfig::default());
        assert_eq!(config.arena.streak_to_win, None);
        assert_eq!(config.arena.points_to_win, Some(3));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_state_flag_overrides_path() {
        let wrapper = Wrapper::parse_from(["arena", "--state", "league.msgpack"]);
        let config = configure(&wrapper.args, &AppConfig::default().with_seed(Some(1)));
        assert_eq!(config.state_path, PathBuf::from("league.msgpack"));
        assert_eq!(config.seed, Some(1));
    }
}

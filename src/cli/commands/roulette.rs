//! Roulette command - run one betting session with a fixed bet slip

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::output::{format_number, print_kv, print_section, print_subsection},
    export::CsvExporter,
    pipeline::EpisodeRunner,
    roulette::{BetSlip, RouletteEnv, SessionStats},
};

#[derive(Parser, Debug)]
#[command(about = "Run a roulette session with a fixed bet slip")]
pub struct RouletteArgs {
    /// Comma-separated bets, e.g. `red,dozen2,voisins`
    #[arg(long, default_value = "red")]
    pub bets: String,

    /// Step ceiling for the session
    #[arg(long)]
    pub steps: Option<u64>,

    /// Starting balance
    #[arg(long)]
    pub balance: Option<f64>,

    /// Stake placed on each active bet
    #[arg(long)]
    pub stake: Option<f64>,

    /// Number covered by the direct bet
    #[arg(long)]
    pub direct_number: Option<u8>,

    /// Outcomes kept for the histogram observation
    #[arg(long)]
    pub history_window: Option<usize>,

    /// Number of most frequent outcomes to list
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Export every spin to CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: RouletteArgs, app: &App) -> Result<()> {
    let slip = BetSlip::parse_list(&args.bets)?;

    let mut config = app.config().roulette.clone().with_spin_log(true);
    if let Some(steps) = args.steps {
        config = config.with_max_steps(steps);
    }
    if let Some(balance) = args.balance {
        config = config.with_initial_balance(balance);
    }
    if let Some(stake) = args.stake {
        config = config.with_stake(stake);
    }
    if let Some(number) = args.direct_number {
        config = config.with_direct_number(number);
    }
    if let Some(window) = args.history_window {
        config = config.with_history_window(window);
    }

    let seed = args.seed.or(app.config().seed);
    let mut env = RouletteEnv::uniform(config, seed).context("invalid roulette settings")?;
    let summary = EpisodeRunner::new().run(&mut env, seed, |_, _| slip)?;
    let stats = SessionStats::from_outcomes(env.spins().iter().map(|spin| spin.number));

    print_section(&format!("Roulette session: {slip}"));
    print_kv("Spins", &format_number(summary.steps));
    print_kv("Final balance", &format!("{:.2}", env.balance()));
    print_kv("Net result", &format!("{:+.2}", summary.total_reward));
    let ending = if summary.terminated {
        "bankrupt"
    } else if summary.truncated {
        "step limit"
    } else {
        "stopped"
    };
    print_kv("Ended by", ending);

    print_subsection(&format!("Top {} numbers", args.top));
    for share in stats.top_numbers(args.top) {
        print_kv(
            &share.number.to_string(),
            &format!("{} ({:.2}%)", share.count, share.percent),
        );
    }

    print_subsection("Groups");
    for (sector, count) in stats.sector_counts() {
        print_kv(sector.label(), &count.to_string());
    }
    let dozens = stats.dozen_counts();
    print_kv(
        "Dozens",
        &format!("{} / {} / {}", dozens[0], dozens[1], dozens[2]),
    );
    let columns = stats.column_counts();
    print_kv(
        "Columns",
        &format!("{} / {} / {}", columns[0], columns[1], columns[2]),
    );
    if let Some(sector) = stats.hottest_sector() {
        print_kv("Hottest sector", sector.label());
    }
    if let Some(p) = stats.uniformity_p_value() {
        print_kv(
            "Uniformity",
            &format!("chi2 = {:.2}, p = {p:.4}", stats.chi_square()),
        );
    }

    if let Some(path) = &args.csv {
        let rows = CsvExporter::write_spins(path, env.spins())
            .with_context(|| format!("failed to export spins to {}", path.display()))?;
        println!("\n✓ {rows} spins exported to: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;

    #[test]
    fn test_reset_uses_runner_seed() {
        // the session must be reproducible from the seed alone
        let app = App::for_testing().with_default_seed(4).build();
        let run = || {
            let mut env = app.roulette().unwrap();
            let slip = BetSlip::parse_list("odd").unwrap();
            EpisodeRunner::new()
                .with_max_steps(Some(50))
                .run(&mut env, Some(4), |_, _| slip)
                .unwrap()
        };
        assert_eq!(run(), run());
        let mut env = app.roulette().unwrap();
        assert_eq!(env.reset(None).0.balance, 100.0);
    }
}

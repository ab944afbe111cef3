//! Series of matches between the same two agents

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EndReason, MatchController, MatchReport};
use crate::{Result, agents::Policy, arena::Side};

/// Result of a tournament, counted from the left agent's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub matches: usize,
    pub left_wins: usize,
    pub right_wins: usize,
    pub draws: usize,
    /// Matches decided by a scoring streak
    pub streak_finishes: usize,
    pub left_points: u64,
    pub right_points: u64,
    pub left_win_rate: f64,
    pub draw_rate: f64,
}

impl TournamentResult {
    pub fn from_reports(reports: &[MatchReport]) -> Self {
        let count = |side: Option<Side>| reports.iter().filter(|r| r.winner == side).count();
        let matches = reports.len();
        let left_wins = count(Some(Side::Left));
        let draws = count(None);
        let rate = |n: usize| {
            if matches > 0 {
                n as f64 / matches as f64
            } else {
                0.0
            }
        };
        Self {
            matches,
            left_wins,
            right_wins: count(Some(Side::Right)),
            draws,
            streak_finishes: reports
                .iter()
                .filter(|r| matches!(r.reason, EndReason::Streak(_)))
                .count(),
            left_points: reports.iter().map(|r| u64::from(r.left_score)).sum(),
            right_points: reports.iter().map(|r| u64::from(r.right_score)).sum(),
            left_win_rate: rate(left_wins),
            draw_rate: rate(draws),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays a fixed number of matches through one controller.
///
/// Agents keep their learned metrics between matches.
pub struct Tournament {
    controller: MatchController,
    matches: usize,
}

impl Tournament {
    pub fn new(controller: MatchController, matches: usize) -> Self {
        Self {
            controller,
            matches,
        }
    }

    pub fn run(&mut self, left: &mut dyn Policy, right: &mut dyn Policy) -> Result<TournamentResult> {
        let mut reports = Vec::with_capacity(self.matches);
        for _ in 0..self.matches {
            reports.push(self.controller.run(left, right)?);
        }
        let result = TournamentResult::from_reports(&reports);
        tracing::info!(
            matches = result.matches,
            left_wins = result.left_wins,
            right_wins = result.right_wins,
            draws = result.draws,
            "tournament finished"
        );
        Ok(result)
    }
}

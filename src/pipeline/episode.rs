//! Episode driver for the turn-based environments

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    env::{Environment, StepInfo},
    grid::{GridEnv, GridMover, GridRules, MatchResult, Player},
};

/// Aggregate of one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub steps: u64,
    pub total_reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    /// Info returned by the final step
    pub info: StepInfo,
}

impl EpisodeSummary {
    /// Final grid result, if the environment reports one
    pub fn result(&self) -> Option<MatchResult> {
        self.info.result
    }
}

/// Drives any [`Environment`] from reset to a terminal or truncated step
#[derive(Debug, Clone, Default)]
pub struct EpisodeRunner {
    max_steps: Option<u64>,
}

impl EpisodeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after this many steps even if the environment has no ceiling of
    /// its own. The summary is then marked truncated.
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Run one episode.
    ///
    /// `actor` sees the environment and the latest observation and returns
    /// the next action.
    pub fn run<E, F>(&self, env: &mut E, seed: Option<u64>, mut actor: F) -> Result<EpisodeSummary>
    where
        E: Environment,
        F: FnMut(&E, &E::Observation) -> E::Action,
    {
        let (mut observation, info) = env.reset(seed);
        let mut summary = EpisodeSummary {
            steps: 0,
            total_reward: 0.0,
            terminated: false,
            truncated: false,
            info,
        };

        loop {
            if self.max_steps.is_some_and(|limit| summary.steps >= limit) {
                summary.truncated = true;
                break;
            }
            let action = actor(env, &observation);
            let step = env.step(action)?;
            summary.steps += 1;
            summary.total_reward += step.reward;
            summary.terminated = step.terminated;
            summary.truncated = step.truncated;
            summary.info = step.info;
            if summary.terminated || summary.truncated {
                break;
            }
            observation = step.observation;
        }

        tracing::debug!(
            steps = summary.steps,
            reward = summary.total_reward,
            terminated = summary.terminated,
            truncated = summary.truncated,
            "episode finished"
        );
        Ok(summary)
    }

    /// Play one grid episode with `first` moving for player A and `second`
    /// for player B.
    ///
    /// A mover that finds no move hands the environment an out-of-range
    /// action, which forfeits like any other illegal move.
    pub fn run_grid<R, A, B>(
        &self,
        env: &mut GridEnv<R>,
        seed: Option<u64>,
        first: &mut A,
        second: &mut B,
    ) -> Result<EpisodeSummary>
    where
        R: GridRules,
        A: GridMover,
        B: GridMover,
    {
        self.run(env, seed, |env, _| {
            match env.to_move() {
                Player::A => first.choose(env),
                Player::B => second.choose(env),
            }
            .unwrap_or(usize::MAX)
        })
    }
}

/// Outcome counts over many grid episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridTally {
    pub episodes: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    /// Episodes ended by an illegal move
    pub forfeits: usize,
}

impl GridTally {
    pub fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::Win(Player::A) => self.first_wins += 1,
            MatchResult::Win(Player::B) => self.second_wins += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Forfeit(_) => self.forfeits += 1,
            MatchResult::Ongoing => return,
        }
        self.episodes += 1;
    }

    fn rate(&self, count: usize) -> f64 {
        if self.episodes > 0 {
            count as f64 / self.episodes as f64
        } else {
            0.0
        }
    }

    pub fn first_win_rate(&self) -> f64 {
        self.rate(self.first_wins)
    }

    pub fn second_win_rate(&self) -> f64 {
        self.rate(self.second_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Save tally to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load tally from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let tally = serde_json::from_reader(file)?;
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::{GreedyMover, RandomMover},
        roulette::{Bet, BetSlip, RouletteConfig, RouletteEnv, ScriptedSpinner},
    };

    #[test]
    fn test_scripted_connect_four_column_win() {
        let mut env = GridEnv::connect_four();
        let moves = [0, 1, 0, 1, 0, 1, 0];
        let mut cursor = moves.iter().copied();
        let summary = EpisodeRunner::new()
            .run(&mut env, None, |_, _| cursor.next().unwrap_or(0))
            .unwrap();

        assert_eq!(summary.steps, 7);
        assert!(summary.terminated);
        assert_eq!(summary.result(), Some(MatchResult::Win(Player::A)));
        assert_eq!(summary.total_reward, 10.0);
    }

    #[test]
    fn test_grid_movers_always_finish() {
        let runner = EpisodeRunner::new();
        let mut tally = GridTally::default();
        let mut env = GridEnv::tic_tac_toe();
        let mut first = GreedyMover::new(Some(1));
        let mut second = RandomMover::new(Some(2));
        for _ in 0..20 {
            let summary = runner
                .run_grid(&mut env, None, &mut first, &mut second)
                .unwrap();
            assert!(summary.terminated);
            assert!(summary.steps <= 9);
            tally.record(summary.result().unwrap());
        }
        assert_eq!(tally.episodes, 20);
        assert_eq!(tally.forfeits, 0);
        assert_eq!(tally.first_wins + tally.second_wins + tally.draws, 20);
    }

    #[test]
    fn test_roulette_episode_and_runner_ceiling() {
        let config = RouletteConfig::default().with_max_steps(4);
        let mut env = RouletteEnv::new(config, ScriptedSpinner::new(vec![2, 4, 7, 8])).unwrap();
        let slip = BetSlip::of(&[Bet::Even]);
        let summary = EpisodeRunner::new()
            .run(&mut env, None, |_, _| slip)
            .unwrap();
        assert_eq!(summary.steps, 4);
        assert!(summary.truncated);
        assert_eq!(summary.total_reward, 2.0);
        assert_eq!(summary.info.drawn_number, Some(8));

        let summary = EpisodeRunner::new()
            .with_max_steps(Some(2))
            .run(&mut env, None, |_, _| slip)
            .unwrap();
        assert_eq!(summary.steps, 2);
        assert!(summary.truncated);
        assert!(!summary.terminated);
    }

    #[test]
    fn test_tally_rates_and_json_file() {
        let mut tally = GridTally::default();
        tally.record(MatchResult::Win(Player::A));
        tally.record(MatchResult::Draw);
        tally.record(MatchResult::Ongoing);
        assert_eq!(tally.episodes, 2);
        assert_eq!(tally.first_win_rate(), 0.5);

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tally.json");
        tally.save(&path).unwrap();
        assert_eq!(GridTally::load(&path).unwrap(), tally);
    }
}

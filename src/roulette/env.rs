//! Roulette episode: one spin per step, every active bet resolved independently

use serde::{Deserialize, Serialize};

use super::{
    BET_COUNT, BetSlip, OutcomeHistory, POCKETS, SpinRecord, Spinner, UniformSpinner,
};
use crate::{
    Error, Result,
    env::{Environment, SpaceInfo, SpaceType, StepInfo, StepResult},
};

/// Table and episode settings for the roulette environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouletteConfig {
    pub initial_balance: f64,
    /// Stake placed on every active flag
    pub stake: f64,
    /// Step ceiling; reaching it truncates the episode
    pub max_steps: u64,
    /// Number of recent outcomes kept for the histogram
    pub history_window: usize,
    /// Number paid by the direct bet
    pub direct_number: u8,
    /// Reward applied when a step places no bet at all
    pub idle_penalty: Option<f64>,
    /// Include the outcome histogram in observations
    pub include_histogram: bool,
    /// Keep a per-step [`SpinRecord`] log
    pub record_spins: bool,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            initial_balance: 100.0,
            stake: 1.0,
            max_steps: 1_000_000,
            history_window: 100,
            direct_number: 7,
            idle_penalty: None,
            include_histogram: false,
            record_spins: false,
        }
    }
}

impl RouletteConfig {
    pub fn with_initial_balance(mut self, balance: f64) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn with_stake(mut self, stake: f64) -> Self {
        self.stake = stake;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_direct_number(mut self, number: u8) -> Self {
        self.direct_number = number;
        self
    }

    pub fn with_idle_penalty(mut self, penalty: f64) -> Self {
        self.idle_penalty = Some(penalty);
        self
    }

    pub fn with_histogram(mut self, enabled: bool) -> Self {
        self.include_histogram = enabled;
        self
    }

    pub fn with_spin_log(mut self, enabled: bool) -> Self {
        self.record_spins = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.direct_number as usize >= POCKETS {
            return Err(Error::config(format!(
                "direct number {} is not on the wheel",
                self.direct_number
            )));
        }
        if self.stake.is_nan() || self.stake <= 0.0 {
            return Err(Error::config("stake must be positive"));
        }
        if self.max_steps == 0 {
            return Err(Error::config("max_steps must be at least 1"));
        }
        Ok(())
    }
}

/// What the bettor sees after each spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouletteObservation {
    pub balance: f64,
    /// Normalised frequency of recent outcomes, when enabled
    pub histogram: Option<Vec<f64>>,
}

/// Roulette environment
///
/// The spinner never sees the history window, so draws stay independent of
/// whatever the histogram shows.
#[derive(Debug, Clone)]
pub struct RouletteEnv<S: Spinner = UniformSpinner> {
    config: RouletteConfig,
    spinner: S,
    balance: f64,
    steps: u64,
    history: OutcomeHistory,
    spins: Vec<SpinRecord>,
    done: bool,
}

impl RouletteEnv<UniformSpinner> {
    /// Uniform wheel, optionally seeded
    pub fn uniform(config: RouletteConfig, seed: Option<u64>) -> Result<Self> {
        Self::new(config, UniformSpinner::new(seed))
    }
}

impl<S: Spinner> RouletteEnv<S> {
    pub fn new(config: RouletteConfig, spinner: S) -> Result<Self> {
        config.validate()?;
        let history = OutcomeHistory::new(config.history_window);
        Ok(Self {
            balance: config.initial_balance,
            config,
            spinner,
            steps: 0,
            history,
            spins: Vec::new(),
            done: false,
        })
    }

    pub fn config(&self) -> &RouletteConfig {
        &self.config
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn history(&self) -> &OutcomeHistory {
        &self.history
    }

    /// Per-step records since the last reset (empty unless `record_spins`)
    pub fn spins(&self) -> &[SpinRecord] {
        &self.spins
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn observe(&self) -> RouletteObservation {
        RouletteObservation {
            balance: self.balance,
            histogram: self
                .config
                .include_histogram
                .then(|| self.history.histogram().to_vec()),
        }
    }
}

impl<S: Spinner> Environment for RouletteEnv<S> {
    type Observation = RouletteObservation;
    type Action = BetSlip;

    fn reset(&mut self, seed: Option<u64>) -> (RouletteObservation, StepInfo) {
        if let Some(seed) = seed {
            self.spinner.reseed(seed);
        }
        self.balance = self.config.initial_balance;
        self.steps = 0;
        self.done = false;
        self.history.clear();
        self.spins.clear();
        (self.observe(), StepInfo::default())
    }

    fn step(&mut self, slip: BetSlip) -> Result<StepResult<RouletteObservation>> {
        if self.done {
            return Err(Error::EpisodeFinished);
        }

        let number = self.spinner.spin();
        let reward = match self.config.idle_penalty {
            Some(penalty) if slip.is_empty() => penalty,
            _ => slip.resolve(number, self.config.direct_number, self.config.stake),
        };

        self.balance += reward;
        self.steps += 1;
        self.history.push(number);
        if self.config.record_spins {
            self.spins.push(SpinRecord {
                step: self.steps,
                number,
                bets: slip.to_string(),
                reward,
                balance: self.balance,
            });
        }

        let terminated = self.balance <= 0.0;
        let truncated = !terminated && self.steps >= self.config.max_steps;
        self.done = terminated || truncated;
        if self.done {
            tracing::debug!(
                steps = self.steps,
                balance = self.balance,
                terminated,
                truncated,
                "roulette episode finished"
            );
        }

        Ok(StepResult {
            observation: self.observe(),
            reward,
            terminated,
            truncated,
            info: StepInfo {
                drawn_number: Some(number),
                ..StepInfo::default()
            },
        })
    }

    fn observation_space(&self) -> SpaceInfo {
        let width = if self.config.include_histogram {
            1 + POCKETS
        } else {
            1
        };
        SpaceInfo {
            shape: vec![width],
            space_type: SpaceType::Continuous,
        }
    }

    fn action_space(&self) -> SpaceInfo {
        SpaceInfo {
            shape: vec![BET_COUNT],
            space_type: SpaceType::MultiBinary(BET_COUNT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roulette::{Bet, ScriptedSpinner};

    fn scripted(config: RouletteConfig, outcomes: &[u8]) -> RouletteEnv<ScriptedSpinner> {
        let mut env = RouletteEnv::new(config, ScriptedSpinner::new(outcomes.to_vec())).unwrap();
        env.reset(None);
        env
    }

    #[test]
    fn test_even_bet_over_two_four_seven() {
        let mut env = scripted(RouletteConfig::default(), &[2, 4, 7]);
        let slip = BetSlip::of(&[Bet::Even]);
        let rewards: Vec<f64> = (0..3).map(|_| env.step(slip).unwrap().reward).collect();
        assert_eq!(rewards, vec![1.0, 1.0, -1.0]);
        assert_eq!(env.balance(), 101.0);
    }

    #[test]
    fn test_red_on_zero_loses_stake() {
        let mut env = scripted(RouletteConfig::default(), &[0]);
        let result = env.step(BetSlip::of(&[Bet::Red])).unwrap();
        assert_eq!(result.reward, -1.0);
        assert_eq!(result.info.drawn_number, Some(0));
    }

    #[test]
    fn test_red_and_direct_seven_sum() {
        let mut env = scripted(RouletteConfig::default(), &[7]);
        let result = env.step(BetSlip::of(&[Bet::Red, Bet::Direct])).unwrap();
        assert_eq!(result.reward, 36.0);
        assert_eq!(result.observation.balance, 136.0);
    }

    #[test]
    fn test_bankruptcy_terminates_and_blocks_further_steps() {
        let config = RouletteConfig::default().with_initial_balance(2.0);
        let mut env = scripted(config, &[1]);
        let slip = BetSlip::of(&[Bet::Even]);
        assert!(!env.step(slip).unwrap().terminated);
        let last = env.step(slip).unwrap();
        assert!(last.terminated);
        assert!(!last.truncated);
        assert!(matches!(env.step(slip), Err(Error::EpisodeFinished)));

        env.reset(None);
        assert_eq!(env.balance(), 2.0);
        assert!(env.step(slip).is_ok());
    }

    #[test]
    fn test_step_ceiling_truncates() {
        let config = RouletteConfig::default().with_max_steps(2);
        let mut env = scripted(config, &[2]);
        let slip = BetSlip::of(&[Bet::Even]);
        env.step(slip).unwrap();
        let last = env.step(slip).unwrap();
        assert!(last.truncated);
        assert!(!last.terminated);
    }

    #[test]
    fn test_idle_penalty_only_when_no_bet() {
        let config = RouletteConfig::default().with_idle_penalty(-0.5);
        let mut env = scripted(config, &[3]);
        assert_eq!(env.step(BetSlip::empty()).unwrap().reward, -0.5);
        assert_eq!(env.step(BetSlip::of(&[Bet::Odd])).unwrap().reward, 1.0);

        let mut plain = scripted(RouletteConfig::default(), &[3]);
        assert_eq!(plain.step(BetSlip::empty()).unwrap().reward, 0.0);
    }

    #[test]
    fn test_histogram_observation() {
        let config = RouletteConfig::default()
            .with_histogram(true)
            .with_history_window(2);
        let mut env = scripted(config, &[5, 5, 9]);
        let slip = BetSlip::empty();
        env.step(slip).unwrap();
        env.step(slip).unwrap();
        let obs = env.step(slip).unwrap().observation;
        let histogram = obs.histogram.unwrap();
        assert_eq!(histogram.len(), POCKETS);
        assert_eq!(histogram[5], 0.5);
        assert_eq!(histogram[9], 0.5);
        assert_eq!(env.observation_space().shape, vec![38]);
    }

    #[test]
    fn test_spin_log() {
        let config = RouletteConfig::default().with_spin_log(true);
        let mut env = scripted(config, &[7]);
        env.step(BetSlip::of(&[Bet::Red])).unwrap();
        let record = &env.spins()[0];
        assert_eq!(record.number, 7);
        assert_eq!(record.bets, "red");
        assert_eq!(record.balance, 101.0);
    }

    #[test]
    fn test_rejects_off_wheel_direct_number() {
        let config = RouletteConfig::default().with_direct_number(37);
        assert!(RouletteEnv::uniform(config, Some(1)).is_err());
    }

    #[test]
    fn test_seeded_reset_reproduces_draws() {
        let mut env = RouletteEnv::uniform(RouletteConfig::default(), None).unwrap();
        let slip = BetSlip::of(&[Bet::Black]);
        env.reset(Some(11));
        let first: Vec<_> = (0..20)
            .map(|_| env.step(slip).unwrap().info.drawn_number)
            .collect();
        env.reset(Some(11));
        let second: Vec<_> = (0..20)
            .map(|_| env.step(slip).unwrap().info.drawn_number)
            .collect();
        assert_eq!(first, second);
    }
}

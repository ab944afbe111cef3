//! Episode contract shared by every turn-based environment
//!
//! Drivers call [`Environment::reset`] once, then feed actions to
//! [`Environment::step`] until the returned result is terminated or truncated.

use serde::{Deserialize, Serialize};

use crate::{Result, grid::MatchResult, grid::Player};

/// Core trait for the game environments
pub trait Environment {
    /// Observation type
    type Observation;

    /// Action type
    type Action;

    /// Reset the environment and return the initial observation.
    ///
    /// A seed re-seeds any internal random source before the episode starts.
    fn reset(&mut self, seed: Option<u64>) -> (Self::Observation, StepInfo);

    /// Advance the environment by one action.
    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>>;

    /// Shape of the observation
    fn observation_space(&self) -> SpaceInfo;

    /// Shape of the action
    fn action_space(&self) -> SpaceInfo;
}

/// Result of an environment step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<O> {
    /// Next observation
    pub observation: O,

    /// Reward for the acting side
    pub reward: f64,

    /// Whether the episode reached a terminal state
    pub terminated: bool,

    /// Whether the episode was cut off by a step ceiling
    pub truncated: bool,

    /// Additional info
    pub info: StepInfo,
}

impl<O> StepResult<O> {
    /// True when the driver should stop calling `step`.
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Additional step information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// The action was rejected (grid games only)
    pub invalid_move: bool,

    /// Episode result after this step (grid games only)
    pub result: Option<MatchResult>,

    /// Player whose turn it is after this step (grid games only)
    pub to_move: Option<Player>,

    /// Raw number drawn by the wheel (roulette only)
    pub drawn_number: Option<u8>,
}

/// Space information for observations and actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceInfo {
    /// Shape of the space
    pub shape: Vec<usize>,

    /// Kind of values in the space
    pub space_type: SpaceType,
}

/// Space data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceType {
    /// Discrete space with n options
    Discrete(usize),

    /// Fixed number of independent binary flags
    MultiBinary(usize),

    /// Bounded integer cells (board observations)
    Cells { low: i8, high: i8 },

    /// Unbounded real values
    Continuous,
}

//! Cautious drifter: slow, rare changes of direction, often standing still

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::{
    AgentCore, AgentKind, PaddleCommand, PaddleView, Policy,
    mood::{SCALE_MAX, scale},
    policy::{rally_length_score, window_rng},
};

const DRIFT_SPEED: f64 = 2.0;
const BASE_INTERVAL_TICKS: f64 = 60.0;
/// Extra ticks between direction changes per point of patience
const PATIENCE_TICKS: f64 = 12.0;
const DIRECTIONS: [f64; 3] = [-1.0, 0.0, 1.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cautious {
    #[serde(flatten)]
    pub core: AgentCore,
    pub seed: u64,
    pub drift_speed: f64,
    pub patience: f64,
}

impl Cautious {
    pub fn new(seed: u64) -> Self {
        Self {
            core: AgentCore::default(),
            seed,
            drift_speed: DRIFT_SPEED,
            patience: 5.0,
        }
    }

    pub fn interval_ticks(&self) -> u64 {
        (BASE_INTERVAL_TICKS + self.patience * PATIENCE_TICKS) as u64
    }

    fn direction(&self, tick: u64) -> f64 {
        let window = tick / self.interval_ticks();
        DIRECTIONS
            .choose(&mut window_rng(self.seed, window))
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for Cautious {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Policy for Cautious {
    fn kind(&self) -> AgentKind {
        AgentKind::Cautious
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn skill_name(&self) -> &'static str {
        "patience"
    }

    fn skill(&self) -> f64 {
        scale(self.patience)
    }

    fn next_move(&mut self, view: &PaddleView<'_>) -> PaddleCommand {
        PaddleCommand::Single(self.direction(view.tick) * self.drift_speed)
    }

    fn adapt(&mut self, score: i8, average_rally: f64) -> (f64, f64) {
        let difficulty = 10.0 - rally_length_score(average_rally);
        let delta = match score {
            1 => 0.5,
            -1 => -0.25,
            _ => 0.0,
        };
        self.patience = (self.patience + delta).clamp(0.0, SCALE_MAX);
        (difficulty, 5.0 + 2.5 * f64::from(score))
    }
}

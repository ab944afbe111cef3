//! Reactive tracker: chases the ball's current height

use serde::{Deserialize, Serialize};

use super::{
    AgentCore, AgentKind, PaddleCommand, PaddleView, Policy, mood::scale, view::step_toward,
};

const BASE_SPEED: f64 = 5.0;
const SPEED_STEP: f64 = 0.5;
const MAX_SPEED: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(flatten)]
    pub core: AgentCore,
    pub speed: f64,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            core: AgentCore::default(),
            speed: BASE_SPEED,
        }
    }
}

impl Policy for Tracker {
    fn kind(&self) -> AgentKind {
        AgentKind::Tracker
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn skill_name(&self) -> &'static str {
        "speed"
    }

    fn skill(&self) -> f64 {
        scale(self.speed / BASE_SPEED)
    }

    fn next_move(&mut self, view: &PaddleView<'_>) -> PaddleCommand {
        let (Some(ball), Some(paddle)) = (view.focus_ball(), view.paddle()) else {
            return PaddleCommand::Single(0.0);
        };
        PaddleCommand::Single(step_toward(paddle.center_y(), ball.center_y(), self.speed))
    }

    /// Short rallies read as a strong opponent; a strong opponent makes the
    /// tracker faster.
    fn adapt(&mut self, score: i8, average_rally: f64) -> (f64, f64) {
        let difficulty = scale((100.0 - average_rally / 100.0) / 10.0);
        if difficulty > 5.0 {
            self.speed = (self.speed + SPEED_STEP).min(MAX_SPEED);
        }
        let satisfaction = 5.0 + f64::from(score) * difficulty / 2.0;
        (difficulty, satisfaction)
    }
}

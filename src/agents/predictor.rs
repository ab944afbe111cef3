//! Predictive tracker: heads for where the ball will cross its paddle

use serde::{Deserialize, Serialize};

use super::{
    AgentCore, AgentKind, PaddleCommand, PaddleView, Policy,
    mood::scale,
    policy::rally_length_score,
    view::{intercept_y, step_toward},
};

const SPEED: f64 = 6.0;
const FORESIGHT_STEP: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictor {
    #[serde(flatten)]
    pub core: AgentCore,
    pub speed: f64,
    /// Blend between the ball's current height (0) and the predicted
    /// intercept (1)
    pub foresight: f64,
}

impl Default for Predictor {
    fn default() -> Self {
        Self {
            core: AgentCore::default(),
            speed: SPEED,
            foresight: 0.5,
        }
    }
}

impl Predictor {
    fn target(&self, view: &PaddleView<'_>) -> Option<f64> {
        let ball = view.focus_ball()?;
        if !ball.approaches(view.side) {
            return Some(view.arena_height / 2.0);
        }
        let predicted = intercept_y(ball, view.contact_x(ball), view.arena_height);
        let now = ball.y;
        Some(now + self.foresight * (predicted - now) + ball.size / 2.0)
    }
}

impl Policy for Predictor {
    fn kind(&self) -> AgentKind {
        AgentKind::Predictor
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn skill_name(&self) -> &'static str {
        "foresight"
    }

    fn skill(&self) -> f64 {
        scale(self.foresight * 10.0)
    }

    fn next_move(&mut self, view: &PaddleView<'_>) -> PaddleCommand {
        match (self.target(view), view.paddle()) {
            (Some(target), Some(paddle)) => {
                PaddleCommand::Single(step_toward(paddle.center_y(), target, self.speed))
            }
            _ => PaddleCommand::Single(0.0),
        }
    }

    /// Lost rallies push the blend towards pure prediction
    fn adapt(&mut self, score: i8, average_rally: f64) -> (f64, f64) {
        let difficulty = 10.0 - rally_length_score(average_rally);
        if score < 0 {
            self.foresight = (self.foresight + FORESIGHT_STEP).min(1.0);
        }
        let satisfaction = 5.0 + f64::from(score) * difficulty / 2.0;
        (difficulty, satisfaction)
    }
}

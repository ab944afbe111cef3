//! Escalating tracker: grows faster and taller as the match clock runs, and
//! strikes back at double speed after losing a rally

use serde::{Deserialize, Serialize};

use super::{
    AgentCore, AgentKind, PaddleCommand, PaddleView, Policy, mood::scale, view::step_toward,
};

const BASE_SPEED: f64 = 25.0;
const BASE_HEIGHT: f64 = 100.0;
const MAX_HEIGHT: f64 = 200.0;
const GROWTH_INTERVAL_SECS: f64 = 20.0;
const GROWTH_SPEED: f64 = 5.0;
const GROWTH_HEIGHT: f64 = 20.0;
/// Length of the double-speed boost after a lost rally
const VENGEANCE_TICKS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escalating {
    #[serde(flatten)]
    pub core: AgentCore,
    pub speed: f64,
    pub paddle_height: f64,
    /// Growth steps taken over the agent's lifetime
    pub growth: u32,
    /// Growth steps taken in the current match
    pub match_stage: u32,
    pub vengeance_pending: bool,
    /// Tick at which the current boost ends
    pub vengeance_until: Option<u64>,
}

impl Default for Escalating {
    fn default() -> Self {
        Self {
            core: AgentCore::default(),
            speed: BASE_SPEED,
            paddle_height: BASE_HEIGHT,
            growth: 0,
            match_stage: 0,
            vengeance_pending: false,
            vengeance_until: None,
        }
    }
}

impl Escalating {
    fn grow_to(&mut self, elapsed_secs: f64) {
        let stage = (elapsed_secs / GROWTH_INTERVAL_SECS).floor().max(0.0) as u32;
        while self.match_stage < stage {
            self.match_stage += 1;
            self.growth += 1;
            self.speed += GROWTH_SPEED;
            self.paddle_height = (self.paddle_height + GROWTH_HEIGHT).min(MAX_HEIGHT);
        }
    }

    /// Speed for this tick, including any vengeance boost
    pub fn effective_speed(&mut self, tick: u64) -> f64 {
        if self.vengeance_pending {
            self.vengeance_pending = false;
            self.vengeance_until = Some(tick + VENGEANCE_TICKS);
        }
        match self.vengeance_until {
            Some(until) if tick < until => self.speed * 2.0,
            _ => self.speed,
        }
    }
}

impl Policy for Escalating {
    fn kind(&self) -> AgentKind {
        AgentKind::Escalating
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn skill_name(&self) -> &'static str {
        "growth"
    }

    fn skill(&self) -> f64 {
        scale(f64::from(self.growth) + self.speed / BASE_SPEED)
    }

    fn paddle_height(&self) -> Option<f64> {
        Some(self.paddle_height)
    }

    fn on_match_start(&mut self) {
        self.speed = BASE_SPEED;
        self.paddle_height = BASE_HEIGHT;
        self.match_stage = 0;
        self.vengeance_pending = false;
        self.vengeance_until = None;
    }

    fn next_move(&mut self, view: &PaddleView<'_>) -> PaddleCommand {
        self.grow_to(view.elapsed_secs);
        let speed = self.effective_speed(view.tick);
        let (Some(ball), Some(paddle)) = (view.focus_ball(), view.paddle()) else {
            return PaddleCommand::Single(0.0);
        };
        PaddleCommand::Single(step_toward(paddle.center_y(), ball.center_y(), speed))
    }

    /// The escalating agent always rates its opponent at full difficulty
    fn adapt(&mut self, score: i8, average_rally: f64) -> (f64, f64) {
        let bonus = (average_rally / 500.0).min(2.0);
        let satisfaction = match score {
            1 => 8.0 + bonus,
            -1 => {
                self.vengeance_pending = true;
                2.0 - bonus
            }
            _ => 5.0 + bonus,
        };
        (10.0, satisfaction)
    }
}

//! Chaotic wanderer: ignores the ball and drifts in random bursts

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    AgentCore, AgentKind, PaddleCommand, PaddleView, Policy,
    mood::scale,
    policy::{rally_length_score, window_rng},
};

const BASE_SPEED: f64 = 3.0;
const MAX_DISORDER: f64 = 8.0;
/// Burst length at zero disorder; each point of disorder shortens it
const BASE_BURST_TICKS: f64 = 40.0;
const BURST_STEP_TICKS: f64 = 4.0;
/// Distance from a wall at which the wanderer turns back
const WALL_MARGIN: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chaotic {
    #[serde(flatten)]
    pub core: AgentCore,
    pub seed: u64,
    /// Grows with enjoyable (long) rallies; shortens bursts and speeds them up
    pub disorder: f64,
}

impl Chaotic {
    pub fn new(seed: u64) -> Self {
        Self {
            core: AgentCore::default(),
            seed,
            disorder: 0.0,
        }
    }

    pub fn burst_ticks(&self) -> u64 {
        (BASE_BURST_TICKS - self.disorder * BURST_STEP_TICKS).max(1.0) as u64
    }

    pub fn speed(&self) -> f64 {
        BASE_SPEED + self.disorder / 2.0
    }

    fn direction(&self, tick: u64) -> f64 {
        let window = tick / self.burst_ticks();
        if window_rng(self.seed, window).random_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }
}

impl Default for Chaotic {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Policy for Chaotic {
    fn kind(&self) -> AgentKind {
        AgentKind::Chaotic
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn skill_name(&self) -> &'static str {
        "disorder"
    }

    fn skill(&self) -> f64 {
        scale(self.disorder * 10.0 / MAX_DISORDER)
    }

    fn next_move(&mut self, view: &PaddleView<'_>) -> PaddleCommand {
        let Some(paddle) = view.paddle() else {
            return PaddleCommand::Single(0.0);
        };
        let speed = self.speed();
        let delta = if paddle.y < WALL_MARGIN {
            speed
        } else if paddle.y + paddle.height > view.arena_height - WALL_MARGIN {
            -speed
        } else {
            self.direction(view.tick) * speed
        };
        PaddleCommand::Single(delta)
    }

    /// Long rallies are fun, and fun breeds disorder
    fn adapt(&mut self, _score: i8, average_rally: f64) -> (f64, f64) {
        let fun = rally_length_score(average_rally);
        self.disorder = (self.disorder + fun / 5.0).min(MAX_DISORDER);
        (10.0 - fun, fun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Paddle, Side};

    fn view(paddles: &[Paddle], tick: u64) -> PaddleView<'_> {
        PaddleView {
            side: Side::Right,
            balls: &[],
            paddles,
            arena_width: 800.0,
            arena_height: 600.0,
            tick,
            elapsed_secs: 0.0,
        }
    }

    fn paddle(y: f64) -> Paddle {
        Paddle {
            x: 775.0,
            y,
            width: 15.0,
            height: 100.0,
        }
    }

    #[test]
    fn test_direction_constant_within_burst() {
        let mut agent = Chaotic::new(5);
        let paddles = [paddle(250.0)];
        let first = agent.next_move(&view(&paddles, 0));
        for tick in 1..agent.burst_ticks() {
            assert_eq!(agent.next_move(&view(&paddles, tick)), first);
        }
    }

    #[test]
    fn test_turns_back_at_walls() {
        let mut agent = Chaotic::new(5);
        assert_eq!(
            agent.next_move(&view(&[paddle(0.0)], 3)),
            PaddleCommand::Single(3.0)
        );
        assert_eq!(
            agent.next_move(&view(&[paddle(500.0)], 3)),
            PaddleCommand::Single(-3.0)
        );
    }

    #[test]
    fn test_same_seed_same_moves() {
        let mut a = Chaotic::new(77);
        let mut b = a.clone();
        let paddles = [paddle(250.0)];
        for tick in (0..2000).step_by(13) {
            assert_eq!(
                a.next_move(&view(&paddles, tick)),
                b.next_move(&view(&paddles, tick))
            );
        }
    }

    #[test]
    fn test_disorder_is_bounded() {
        let mut agent = Chaotic::new(1);
        agent.register_rally(5000);
        for _ in 0..10 {
            agent.on_rally_end(0);
        }
        assert_eq!(agent.disorder, MAX_DISORDER);
        assert_eq!(agent.burst_ticks(), 8);
        assert_eq!(agent.skill(), 10.0);
    }
}

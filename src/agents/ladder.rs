//! Multi-paddle coordinator

use serde::{Deserialize, Serialize};

use super::{
    AgentCore, AgentKind, PaddleCommand, PaddleView, Policy,
    mood::scale,
    policy::rally_length_score,
    view::step_toward,
};
use crate::arena::paddle::LADDER_GAP;

const SPEED: f64 = 7.0;
const MAX_SPEED: f64 = 14.0;
const SPEED_STEP: f64 = 0.25;
const PADDLE_HEIGHT: f64 = 50.0;

/// Moves the paddle nearest the ball onto it and keeps its siblings stacked
/// at a fixed spacing above and below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    #[serde(flatten)]
    pub core: AgentCore,
    pub speed: f64,
    pub paddles: usize,
    pub paddle_height: f64,
}

impl Default for Ladder {
    fn default() -> Self {
        Self {
            core: AgentCore::default(),
            speed: SPEED,
            paddles: 2,
            paddle_height: PADDLE_HEIGHT,
        }
    }
}

impl Policy for Ladder {
    fn kind(&self) -> AgentKind {
        AgentKind::Ladder
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
        scale(self.speed * 10.0 / MAX_SPEED)
    }

    fn paddle_count(&self) -> usize {
        self.paddles.max(1)
    }

    fn paddle_height(&self) -> Option<f64> {
        Some(self.paddle_height)
    }

    fn next_move(&mut self, view: &PaddleView<'_>) -> PaddleCommand {
        let paddles = view.paddles;
        let (Some(ball), false) = (view.focus_ball(), paddles.is_empty()) else {
            return PaddleCommand::Ladder(vec![0.0; paddles.len()]);
        };
        let target = ball.center_y();
        let lead = paddles
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.center_y() - target)
                    .abs()
                    .total_cmp(&(b.center_y() - target).abs())
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        // keep the whole stack inside the arena so siblings never bunch at a wall
        let pitch = self.paddle_height + LADDER_GAP;
        let half = self.paddle_height / 2.0;
        let lowest = lead as f64 * pitch + half;
        let highest = view.arena_height - (paddles.len() - 1 - lead) as f64 * pitch - half;
        let target = target.min(highest).max(lowest);
        let deltas = paddles
            .iter()
            .enumerate()
            .map(|(i, paddle)| {
                let offset = (i as f64 - lead as f64) * pitch;
                step_toward(paddle.center_y(), target + offset, self.speed)
            })
            .collect();
        PaddleCommand::Ladder(deltas)
    }

    fn adapt(&mut self, score: i8, average_rally: f64) -> (f64, f64) {
        let difficulty = 10.0 - rally_length_score(average_rally);
        if score < 0 {
            self.speed = (self.speed + SPEED_STEP).min(MAX_SPEED);
        }
        (difficulty, 5.0 + 5.0 * f64::from(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Ball, Paddle, Side};

    fn paddle(y: f64) -> Paddle {
        Paddle {
            x: 775.0,
            y,
            width: 15.0,
            height: 50.0,
        }
    }

    #[test]
    fn test_lead_tracks_ball_and_sibling_keeps_spacing() {
        let mut agent = Ladder::default();
        let balls = [Ball {
            x: 400.0,
            y: 92.5,
            dx: 5.0,
            dy: 5.0,
            size: 15.0,
        }];
        // upper centre 125, lower centre 180
        let paddles = [paddle(100.0), paddle(155.0)];
        let view = PaddleView {
            side: Side::Right,
            balls: &balls,
            paddles: &paddles,
            arena_width: 800.0,
            arena_height: 600.0,
            tick: 0,
            elapsed_secs: 0.0,
        };
        // target centre 100: upper moves up, lower follows at 155
        assert_eq!(
            agent.next_move(&view),
            PaddleCommand::Ladder(vec![-7.0, -7.0])
        );
    }

    #[test]
    fn test_spacing_holds_with_ball_at_the_wall() {
        let mut agent = Ladder::default();
        let balls = [Ball {
            x: 400.0,
            y: 0.0,
            dx: 5.0,
            dy: -5.0,
            size: 15.0,
        }];
        let mut paddles = [paddle(247.5), paddle(302.5)];
        for tick in 0..200 {
            let view = PaddleView {
                side: Side::Right,
                balls: &balls,
                paddles: &paddles,
                arena_width: 800.0,
                arena_height: 600.0,
                tick,
                elapsed_secs: 0.0,
            };
            let command = agent.next_move(&view);
            for (paddle, delta) in paddles.iter_mut().zip(command.deltas()) {
                paddle.y = (paddle.y + delta).clamp(0.0, 550.0);
            }
            assert!(paddles[1].y - paddles[0].rect().bottom() >= LADDER_GAP - 1e-9);
        }
        assert_eq!(paddles[0].y, 0.0);
        assert_eq!(paddles[1].y - paddles[0].rect().bottom(), LADDER_GAP);
    }

    #[test]
    fn test_spacing_holds_at_the_bottom_wall() {
        let mut agent = Ladder::default();
        let balls = [Ball {
            x: 400.0,
            y: 585.0,
            dx: 5.0,
            dy: 5.0,
            size: 15.0,
        }];
        // lower paddle already at the floor, upper one too close
        let paddles = [paddle(520.0), paddle(550.0)];
        let view = PaddleView {
            side: Side::Right,
            balls: &balls,
            paddles: &paddles,
            arena_width: 800.0,
            arena_height: 600.0,
            tick: 0,
            elapsed_secs: 0.0,
        };
        // lead (lower) stays put, upper backs off toward 495
        assert_eq!(
            agent.next_move(&view),
            PaddleCommand::Ladder(vec![-7.0, 0.0])
        );
    }

    #[test]
    fn test_holds_still_without_ball() {
        let mut agent = Ladder::default();
        let paddles = [paddle(100.0), paddle(155.0)];
        let view = PaddleView {
            side: Side::Right,
            balls: &[],
            paddles: &paddles,
            arena_width: 800.0,
            arena_height: 600.0,
            tick: 0,
            elapsed_secs: 0.0,
        };
        assert_eq!(agent.next_move(&view).deltas(), &[0.0, 0.0]);
        assert_eq!(agent.paddle_count(), 2);
    }
}

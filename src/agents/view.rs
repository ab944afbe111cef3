//! What a policy sees each tick, and what it answers

use serde::{Deserialize, Serialize};

use crate::arena::{Arena, Ball, Paddle, Side};

/// Read-only arena snapshot handed to a policy
#[derive(Debug, Clone, Copy)]
pub struct PaddleView<'a> {
    pub side: Side,
    pub balls: &'a [Ball],
    /// The policy's own paddles, top to bottom
    pub paddles: &'a [Paddle],
    pub arena_width: f64,
    pub arena_height: f64,
    /// Ticks since the match started
    pub tick: u64,
    /// Simulated seconds since the match started
    pub elapsed_secs: f64,
}

impl<'a> PaddleView<'a> {
    pub fn from_arena(arena: &'a Arena, side: Side, tick: u64, elapsed_secs: f64) -> Self {
        Self {
            side,
            balls: arena.balls(),
            paddles: arena.rack(side).paddles(),
            arena_width: arena.config().width,
            arena_height: arena.config().height,
            tick,
            elapsed_secs,
        }
    }

    /// The ball that will reach this side first, or the first ball in play
    /// when none is approaching.
    pub fn focus_ball(&self) -> Option<&'a Ball> {
        let wall_x = match self.side {
            Side::Left => 0.0,
            Side::Right => self.arena_width,
        };
        self.balls
            .iter()
            .filter(|ball| ball.approaches(self.side))
            .min_by(|a, b| {
                let ta = (a.x - wall_x).abs() / a.dx.abs();
                let tb = (b.x - wall_x).abs() / b.dx.abs();
                ta.total_cmp(&tb)
            })
            .or_else(|| self.balls.first())
    }

    pub fn paddle(&self) -> Option<&'a Paddle> {
        self.paddles.first()
    }

    /// x coordinate the ball's left edge has when it touches this side's paddle face
    pub fn contact_x(&self, ball: &Ball) -> f64 {
        match (self.side, self.paddle()) {
            (Side::Left, Some(p)) => p.x + p.width,
            (Side::Right, Some(p)) => p.x - ball.size,
            (Side::Left, None) => 0.0,
            (Side::Right, None) => self.arena_width - ball.size,
        }
    }
}

/// Movement returned by a policy for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaddleCommand {
    /// Signed vertical delta for a single paddle
    Single(f64),
    /// One delta per paddle, top to bottom
    Ladder(Vec<f64>),
}

impl PaddleCommand {
    pub fn deltas(&self) -> &[f64] {
        match self {
            PaddleCommand::Single(delta) => std::slice::from_ref(delta),
            PaddleCommand::Ladder(deltas) => deltas,
        }
    }
}

/// Move from `current` towards `target`, never further than `speed`
pub fn step_toward(current: f64, target: f64, speed: f64) -> f64 {
    let speed = speed.abs();
    (target - current).clamp(-speed, speed)
}

/// Top edge of `ball` when its left edge reaches `contact_x`, following
/// reflections off the top and bottom walls.
pub fn intercept_y(ball: &Ball, contact_x: f64, arena_height: f64) -> f64 {
    if ball.dx == 0.0 {
        return ball.y;
    }
    let ticks = ((contact_x - ball.x) / ball.dx).max(0.0);
    let span = (arena_height - ball.size).max(f64::EPSILON);
    let folded = (ball.y + ball.dy * ticks).rem_euclid(2.0 * span);
    if folded > span {
        2.0 * span - folded
    } else {
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(x: f64, y: f64, dx: f64, dy: f64) -> Ball {
        Ball {
            x,
            y,
            dx,
            dy,
            size: 15.0,
        }
    }

    #[test]
    fn test_step_toward_is_proportional_near_target() {
        assert_eq!(step_toward(100.0, 103.0, 5.0), 3.0);
        assert_eq!(step_toward(100.0, 300.0, 5.0), 5.0);
        assert_eq!(step_toward(100.0, 0.0, 5.0), -5.0);
    }

    #[test]
    fn test_intercept_reflects_off_top() {
        let b = ball(400.0, 300.0, -5.0, -5.0);
        // 75 ticks to x = 25; raw y = -75, reflected to 75
        assert_eq!(intercept_y(&b, 25.0, 600.0), 75.0);
    }

    #[test]
    fn test_intercept_reflects_off_bottom() {
        let b = ball(400.0, 500.0, 5.0, 5.0);
        // 72 ticks to x = 760; raw y = 860, span 585 -> 310
        assert_eq!(intercept_y(&b, 760.0, 600.0), 310.0);
    }

    #[test]
    fn test_focus_prefers_nearest_approaching_ball() {
        let balls = [
            ball(600.0, 0.0, -5.0, 5.0),
            ball(200.0, 0.0, -5.0, 5.0),
            ball(100.0, 0.0, 5.0, 5.0),
        ];
        let view = PaddleView {
            side: Side::Left,
            balls: &balls,
            paddles: &[],
            arena_width: 800.0,
            arena_height: 600.0,
            tick: 0,
            elapsed_secs: 0.0,
        };
        assert_eq!(view.focus_ball().map(|b| b.x), Some(200.0));
    }
}

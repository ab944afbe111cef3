//! Per-tick ball physics

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{ArenaConfig, Ball, PaddleRack, Side};
use crate::Result;

/// Balls and paddles of one match
///
/// Paddles move only through [`Arena::move_paddles`]; balls move only through
/// [`Arena::advance`].
#[derive(Debug, Clone)]
pub struct Arena {
    config: ArenaConfig,
    balls: Vec<Ball>,
    left: PaddleRack,
    right: PaddleRack,
    rng: StdRng,
}

impl Arena {
    pub fn new(config: ArenaConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let left = PaddleRack::new(Side::Left, 1, config.paddle_height, &config);
        let right = PaddleRack::new(Side::Right, 1, config.paddle_height, &config);
        let mut arena = Self {
            config,
            balls: Vec::new(),
            left,
            right,
            rng,
        };
        arena.replenish();
        Ok(arena)
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn rack(&self, side: Side) -> &PaddleRack {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn rack_mut(&mut self, side: Side) -> &mut PaddleRack {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Replace `side`'s paddles with a fresh centred rack
    pub fn set_paddles(&mut self, side: Side, count: usize, height: f64) {
        let rack = PaddleRack::new(side, count, height, &self.config);
        *self.rack_mut(side) = rack;
    }

    pub fn set_paddle_height(&mut self, side: Side, height: f64) {
        let arena_height = self.config.height;
        self.rack_mut(side).set_height(height, arena_height);
    }

    /// Apply a policy's movement vector to `side`'s paddles
    pub fn move_paddles(&mut self, side: Side, agent: &str, deltas: &[f64]) -> Result<()> {
        let arena_height = self.config.height;
        self.rack_mut(side).apply(agent, deltas, arena_height)
    }

    /// Put a ball into play, e.g. a scripted one in tests
    pub fn insert_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    pub fn clear_balls(&mut self) {
        self.balls.clear();
    }

    /// A centred ball with a random diagonal velocity
    pub fn serve(&mut self) -> Ball {
        let speed = self.config.ball_speed;
        let dx = if self.rng.random_bool(0.5) { speed } else { -speed };
        let dy = if self.rng.random_bool(0.5) { speed } else { -speed };
        Ball {
            x: (self.config.width - self.config.ball_size) / 2.0,
            y: (self.config.height - self.config.ball_size) / 2.0,
            dx,
            dy,
            size: self.config.ball_size,
        }
    }

    /// Serve fresh balls until the configured number is in play
    pub fn replenish(&mut self) -> usize {
        let missing = self.config.balls_in_play.saturating_sub(self.balls.len());
        for _ in 0..missing {
            let ball = self.serve();
            self.balls.push(ball);
        }
        missing
    }

    /// Advance every ball by one tick.
    ///
    /// Returns the side credited for each ball that left the arena. Scoring
    /// balls are removed; call [`Arena::replenish`] to serve replacements.
    pub fn advance(&mut self) -> Vec<Side> {
        let width = self.config.width;
        let height = self.config.height;
        let mut scored = Vec::new();

        let (left, right) = (&self.left, &self.right);
        self.balls.retain_mut(|ball| {
            ball.advance();

            if ball.y <= 0.0 {
                ball.y = 0.0;
                ball.dy = ball.dy.abs();
            } else if ball.y + ball.size >= height {
                ball.y = height - ball.size;
                ball.dy = -ball.dy.abs();
            }

            for rack in [left, right] {
                let side = rack.side();
                if !ball.approaches(side) {
                    continue;
                }
                let bounds = ball.rect();
                if let Some(paddle) = rack.paddles().iter().find(|p| p.rect().overlaps(&bounds)) {
                    ball.dx = ball.dx.abs() * side.outward();
                    ball.x = match side {
                        Side::Left => paddle.x + paddle.width,
                        Side::Right => paddle.x - ball.size,
                    };
                }
            }

            if ball.x < 0.0 {
                scored.push(Side::Right);
                false
            } else if ball.x + ball.size > width {
                scored.push(Side::Left);
                false
            } else {
                true
            }
        });

        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_arena() -> Arena {
        let mut arena = Arena::new(ArenaConfig::default(), Some(7)).unwrap();
        arena.clear_balls();
        arena
    }

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
    fn test_top_bound_reflects() {
        let mut arena = empty_arena();
        arena.insert_ball(ball(400.0, 5.0, 5.0, -5.0));
        assert!(arena.advance().is_empty());
        let b = arena.balls()[0];
        assert_eq!(b.y, 0.0);
        assert_eq!(b.dy, 5.0);
        arena.advance();
        assert_eq!(arena.balls()[0].y, 5.0);
    }

    #[test]
    fn test_bottom_bound_reflects() {
        let mut arena = empty_arena();
        arena.insert_ball(ball(400.0, 583.0, 5.0, 5.0));
        arena.advance();
        let b = arena.balls()[0];
        assert_eq!(b.y, 585.0);
        assert_eq!(b.dy, -5.0);
    }

    #[test]
    fn test_left_exit_scores_for_right_and_respawns_centred() {
        let mut arena = empty_arena();
        // well below the left paddle
        arena.insert_ball(ball(3.0, 500.0, -5.0, 0.0));
        assert_eq!(arena.advance(), vec![Side::Right]);
        assert!(arena.balls().is_empty());

        assert_eq!(arena.replenish(), 1);
        let fresh = arena.balls()[0];
        assert_eq!(fresh.x, (800.0 - 15.0) / 2.0);
        assert_eq!(fresh.y, (600.0 - 15.0) / 2.0);
        assert_eq!(fresh.dx.abs(), 5.0);
        assert_eq!(fresh.dy.abs(), 5.0);
    }

    #[test]
    fn test_right_exit_scores_for_left() {
        let mut arena = empty_arena();
        arena.insert_ball(ball(782.0, 20.0, 5.0, 0.0));
        assert_eq!(arena.advance(), vec![Side::Left]);
    }

    #[test]
    fn test_paddle_bounce_is_flush_and_single() {
        let mut arena = empty_arena();
        // left paddle spans x 10..25, y 250..350
        arena.insert_ball(ball(27.0, 290.0, -5.0, 0.0));
        arena.advance();
        let b = arena.balls()[0];
        assert_eq!(b.dx, 5.0);
        assert_eq!(b.x, 25.0);
        arena.advance();
        let b = arena.balls()[0];
        assert_eq!(b.dx, 5.0);
        assert_eq!(b.x, 30.0);
    }

    #[test]
    fn test_right_paddle_bounce() {
        let mut arena = empty_arena();
        // right paddle spans x 775..790
        arena.insert_ball(ball(758.0, 290.0, 5.0, 0.0));
        arena.advance();
        let b = arena.balls()[0];
        assert_eq!(b.dx, -5.0);
        assert_eq!(b.x, 760.0);
    }

    #[test]
    fn test_serves_are_reproducible_with_seed() {
        let a = Arena::new(ArenaConfig::default().with_balls(3), Some(99)).unwrap();
        let b = Arena::new(ArenaConfig::default().with_balls(3), Some(99)).unwrap();
        assert_eq!(a.balls(), b.balls());
        assert_eq!(a.balls().len(), 3);
    }
}

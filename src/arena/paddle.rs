//! Paddles and the per-side paddle rack

use serde::{Deserialize, Serialize};

use super::{ArenaConfig, Rect, Side};
use crate::{Error, Result};

/// Space left between neighbouring paddles of a ladder
pub const LADDER_GAP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    fn clamp_to(&mut self, arena_height: f64) {
        self.y = self.y.clamp(0.0, (arena_height - self.height).max(0.0));
    }
}

/// All paddles controlled by one side, ordered top to bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleRack {
    side: Side,
    paddles: Vec<Paddle>,
}

impl PaddleRack {
    /// `count` paddles of `height`, stacked around the vertical centre
    pub fn new(side: Side, count: usize, height: f64, config: &ArenaConfig) -> Self {
        let count = count.max(1);
        let height = height.min(config.height);
        let span = count as f64 * height + (count - 1) as f64 * LADDER_GAP;
        let top = (config.height - span) / 2.0;
        let x = config.paddle_x(side);
        let mut paddles: Vec<Paddle> = (0..count)
            .map(|i| Paddle {
                x,
                y: top + i as f64 * (height + LADDER_GAP),
                width: config.paddle_width,
                height,
            })
            .collect();
        for paddle in &mut paddles {
            paddle.clamp_to(config.height);
        }
        Self { side, paddles }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn paddles(&self) -> &[Paddle] {
        &self.paddles
    }

    pub fn len(&self) -> usize {
        self.paddles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paddles.is_empty()
    }

    /// Resize every paddle, keeping each centred where it was
    pub fn set_height(&mut self, height: f64, arena_height: f64) {
        let height = height.clamp(1.0, arena_height);
        for paddle in &mut self.paddles {
            let center = paddle.center_y();
            paddle.height = height;
            paddle.y = center - height / 2.0;
            paddle.clamp_to(arena_height);
        }
    }

    /// Move each paddle by its delta, then clamp every paddle inside the arena
    pub fn apply(&mut self, agent: &str, deltas: &[f64], arena_height: f64) -> Result<()> {
        if deltas.len() != self.paddles.len() {
            return Err(Error::PaddleCountMismatch {
                agent: agent.to_string(),
                expected: self.paddles.len(),
                got: deltas.len(),
            });
        }
        for (paddle, delta) in self.paddles.iter_mut().zip(deltas) {
            if delta.is_finite() {
                paddle.y += delta;
            }
            paddle.clamp_to(arena_height);
        }
        Ok(())
    }
}

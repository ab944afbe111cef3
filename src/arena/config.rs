//! Arena dimensions, speeds and match-end thresholds

use serde::{Deserialize, Serialize};

use super::Side;
use crate::{Error, Result};

/// Settings for the arena and the matches played in it
///
/// Distances are in pixels, speeds in pixels per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub paddle_width: f64,
    pub paddle_height: f64,
    /// Gap between a side wall and the paddle face
    pub paddle_offset: f64,
    pub ball_size: f64,
    pub ball_speed: f64,
    /// Simulated ticks per second of match time
    pub ticks_per_second: u32,
    pub time_limit_secs: f64,
    /// Consecutive unanswered points that win immediately
    pub streak_to_win: Option<u32>,
    /// Total points that win immediately
    pub points_to_win: Option<u32>,
    pub balls_in_play: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            paddle_width: 15.0,
            paddle_height: 100.0,
            paddle_offset: 10.0,
            ball_size: 15.0,
            ball_speed: 5.0,
            ticks_per_second: 60,
            time_limit_secs: 120.0,
            streak_to_win: Some(5),
            points_to_win: None,
            balls_in_play: 1,
        }
    }
}

impl ArenaConfig {
    pub fn with_time_limit(mut self, secs: f64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    pub fn with_streak_to_win(mut self, streak: Option<u32>) -> Self {
        self.streak_to_win = streak;
        self
    }

    pub fn with_points_to_win(mut self, points: Option<u32>) -> Self {
        self.points_to_win = points;
        self
    }

    pub fn with_balls(mut self, balls: usize) -> Self {
        self.balls_in_play = balls;
        self
    }

    pub fn with_ball_speed(mut self, speed: f64) -> Self {
        self.ball_speed = speed;
        self
    }

    /// Seconds of match time per tick
    pub fn tick_secs(&self) -> f64 {
        1.0 / f64::from(self.ticks_per_second)
    }

    /// Number of ticks before the time limit is reached
    pub fn tick_limit(&self) -> u64 {
        (self.time_limit_secs * f64::from(self.ticks_per_second)).ceil() as u64
    }

    /// x coordinate of the left edge of a paddle on `side`
    pub fn paddle_x(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.paddle_offset,
            Side::Right => self.width - self.paddle_offset - self.paddle_width,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::config("arena dimensions must be positive"));
        }
        if self.ball_size <= 0.0 || self.ball_size >= self.height {
            return Err(Error::config("ball must fit inside the arena"));
        }
        if self.paddle_height <= 0.0 || self.paddle_height > self.height {
            return Err(Error::config("paddle must fit inside the arena"));
        }
        if self.ticks_per_second == 0 {
            return Err(Error::config("ticks_per_second must be at least 1"));
        }
        if self.balls_in_play == 0 {
            return Err(Error::config("at least one ball must be in play"));
        }
        if self.time_limit_secs <= 0.0 {
            return Err(Error::config("time limit must be positive"));
        }
        if matches!(self.streak_to_win, Some(0)) || matches!(self.points_to_win, Some(0)) {
            return Err(Error::config("win thresholds must be at least 1"));
        }
        Ok(())
    }
}

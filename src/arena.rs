//! Pong-style arena: balls, paddles and per-tick physics
//!
//! The arena only knows geometry. Who moves the paddles and when a match is
//! over is decided by [`crate::pipeline::MatchController`].

pub mod config;
pub mod geometry;
pub mod paddle;
pub mod sim;

pub use config::ArenaConfig;
pub use geometry::{Ball, Rect, Side};
pub use paddle::{Paddle, PaddleRack};
pub use sim::Arena;

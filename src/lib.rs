//! Small game engines and adaptive heuristic agents
//!
//! This crate provides:
//! - Connect Four and Tic-Tac-Toe environments behind one episode contract
//! - A multi-bet roulette environment with session statistics
//! - A Pong-style arena with six heuristic paddle agents that adapt their
//!   skill and mood between rallies
//! - Match controller, tournaments, experience logging, and agent
//!   persistence (JSON or MessagePack)

pub mod adapters;
pub mod agents;
pub mod app;
pub mod arena;
pub mod cli;
pub mod env;
pub mod error;
pub mod export;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod roster;
pub mod roulette;

pub use agents::{Agent, AgentKind, Policy};
pub use env::{Environment, StepInfo, StepResult};
pub use error::{Error, Result};
pub use roster::RosterSnapshot;

//! Subcommand implementations

pub mod agents;
pub mod arena;
pub mod grid;
pub mod roulette;

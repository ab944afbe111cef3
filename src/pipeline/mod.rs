//! Drivers that run environments and matches end to end
//!
//! - [`EpisodeRunner`] plays turn-based environments (grid games, roulette)
//! - [`MatchController`] owns the arena tick loop and agent learning
//! - [`Tournament`] repeats matches between the same agents

pub mod controller;
pub mod episode;
pub mod tournament;

pub use controller::{EndReason, MatchContext, MatchController, MatchReport};
pub use episode::{EpisodeRunner, EpisodeSummary, GridTally};
pub use tournament::{Tournament, TournamentResult};

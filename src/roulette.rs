//! Multi-bet roulette: independent uniform draws resolved against a payout table

pub mod bets;
pub mod env;
pub mod history;
pub mod stats;
pub mod wheel;

pub use bets::{BET_COUNT, Bet, BetSlip};
pub use env::{RouletteConfig, RouletteEnv, RouletteObservation};
pub use history::OutcomeHistory;
pub use stats::{NumberShare, SessionStats, SpinRecord};
pub use wheel::{POCKETS, ScriptedSpinner, Sector, Spinner, UniformSpinner};

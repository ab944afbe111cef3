//! Turn-based grid games: Connect Four and Tic-Tac-Toe
//!
//! Both games share one state machine ([`GridEnv`]) and differ only in their
//! [`GridRules`]: where a token lands and how long a winning run is.

pub mod board;
pub mod env;
pub mod lines;
pub mod movers;
pub mod outcome;
pub mod rules;

pub use board::{Cell, Grid, Player};
pub use env::{ConnectFourEnv, GridConfig, GridEnv, RewardPerspective, TicTacToeEnv};
pub use lines::{Direction, WINNING_LINES};
pub use movers::{GreedyMover, GridMover, RandomMover};
pub use outcome::MatchResult;
pub use rules::{ConnectFour, GridRules, TicTacToe};

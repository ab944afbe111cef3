//! Episode result for the grid games

use serde::{Deserialize, Serialize};

use super::Player;

/// Result of a grid episode
///
/// Once a terminal variant is set it never reverts within the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchResult {
    #[default]
    Ongoing,
    Win(Player),
    Draw,
    /// The named player attempted an illegal move and lost the episode
    Forfeit(Player),
}

impl MatchResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MatchResult::Ongoing)
    }

    /// Winner by completed line; forfeits have no line winner
    pub fn winner(self) -> Option<Player> {
        match self {
            MatchResult::Win(player) => Some(player),
            _ => None,
        }
    }

    /// Swap the perspective (A ↔ B)
    pub fn swap_players(self) -> Self {
        match self {
            MatchResult::Win(player) => MatchResult::Win(player.opponent()),
            MatchResult::Forfeit(player) => MatchResult::Forfeit(player.opponent()),
            other => other,
        }
    }
}

//! Placement and win rules for each grid game

use super::{Grid, Player, lines::LineAnalyzer, lines::WINNING_LINES};

/// Rules that distinguish one grid game from another
///
/// The episode state machine lives in [`super::GridEnv`]; implementors only
/// answer where a token lands and whether the mover completed a line.
pub trait GridRules {
    /// Human-readable game name
    fn name(&self) -> &'static str;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Number of distinct actions (columns or cells)
    fn action_count(&self) -> usize;

    /// Flat cell index where `action` would place a token, or `None` when the
    /// action is illegal on this grid.
    fn landing_cell(&self, grid: &Grid, action: usize) -> Option<usize>;

    /// Whether `player` owns a complete winning line
    fn has_won(&self, grid: &Grid, player: Player) -> bool;

    /// Legal actions on this grid
    fn valid_actions(&self, grid: &Grid) -> Vec<usize> {
        (0..self.action_count())
            .filter(|&action| self.landing_cell(grid, action).is_some())
            .collect()
    }

    /// Create an empty grid of the right size
    fn empty_grid(&self) -> Grid {
        Grid::new(self.rows(), self.cols())
    }
}

/// Connect Four: gravity drop into one of the columns, four in a row wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectFour {
    pub rows: usize,
    pub cols: usize,
    pub run_length: usize,
}

impl ConnectFour {
    pub const ROWS: usize = 6;
    pub const COLS: usize = 7;
    pub const RUN_LENGTH: usize = 4;

    /// Lowest empty row in `col`, or `None` when the column is full
    pub fn next_open_row(&self, grid: &Grid, col: usize) -> Option<usize> {
        (0..self.rows).find(|&row| grid.at(row, col).owner().is_none())
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self {
            rows: Self::ROWS,
            cols: Self::COLS,
            run_length: Self::RUN_LENGTH,
        }
    }
}

impl GridRules for ConnectFour {
    fn name(&self) -> &'static str {
        "connect-four"
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn action_count(&self) -> usize {
        self.cols
    }

    fn landing_cell(&self, grid: &Grid, action: usize) -> Option<usize> {
        if action >= self.cols {
            return None;
        }
        self.next_open_row(grid, action)
            .map(|row| grid.index(row, action))
    }

    fn has_won(&self, grid: &Grid, player: Player) -> bool {
        LineAnalyzer::has_run(grid, player, self.run_length)
    }
}

/// Tic-Tac-Toe: place directly on any empty cell of a 3x3 board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicTacToe;

impl GridRules for TicTacToe {
    fn name(&self) -> &'static str {
        "tic-tac-toe"
    }

    fn rows(&self) -> usize {
        3
    }

    fn cols(&self) -> usize {
        3
    }

    fn action_count(&self) -> usize {
        9
    }

    fn landing_cell(&self, grid: &Grid, action: usize) -> Option<usize> {
        (action < 9 && grid.get(action).owner().is_none()).then_some(action)
    }

    fn has_won(&self, grid: &Grid, player: Player) -> bool {
        LineAnalyzer::has_won_lines(grid, player, &WINNING_LINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_four_drops_to_lowest_row() {
        let rules = ConnectFour::default();
        let mut grid = rules.empty_grid();
        assert_eq!(rules.landing_cell(&grid, 2), Some(grid.index(0, 2)));
        grid.place(grid.index(0, 2), Player::A);
        assert_eq!(rules.landing_cell(&grid, 2), Some(grid.index(1, 2)));
    }

    #[test]
    fn test_connect_four_full_column_is_illegal() {
        let rules = ConnectFour::default();
        let mut grid = rules.empty_grid();
        for row in 0..ConnectFour::ROWS {
            let idx = grid.index(row, 0);
            grid.place(idx, if row % 2 == 0 { Player::A } else { Player::B });
        }
        assert_eq!(rules.landing_cell(&grid, 0), None);
        assert_eq!(rules.valid_actions(&grid), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_out_of_range_actions_are_illegal() {
        let grid = Grid::new(6, 7);
        assert_eq!(ConnectFour::default().landing_cell(&grid, 7), None);
        assert_eq!(TicTacToe.landing_cell(&Grid::new(3, 3), 9), None);
    }

    #[test]
    fn test_tictactoe_occupied_cell_is_illegal() {
        let mut grid = TicTacToe.empty_grid();
        grid.place(4, Player::A);
        assert_eq!(TicTacToe.landing_cell(&grid, 4), None);
        assert_eq!(TicTacToe.landing_cell(&grid, 5), Some(5));
        assert_eq!(TicTacToe.valid_actions(&grid).len(), 8);
    }
}

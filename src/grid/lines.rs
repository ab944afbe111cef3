//! Winning line scanners for the grid games

use super::{Grid, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Direction of a straight run on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Up and to the right
    Rising,
    /// Down and to the right
    Falling,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Rising,
        Direction::Falling,
    ];

    /// (row step, column step)
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Rising => (1, 1),
            Direction::Falling => (-1, 1),
        }
    }
}

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check a set of fixed lines for uniform ownership by `player`
    pub fn has_won_lines(grid: &Grid, player: Player, lines: &[[usize; 3]]) -> bool {
        let target = player.to_cell();
        lines
            .iter()
            .any(|line| line.iter().all(|&idx| grid.get(idx) == target))
    }

    /// Exhaustive scan for a run of `len` tokens in any direction
    pub fn has_run(grid: &Grid, player: Player, len: usize) -> bool {
        Self::has_run_in(grid, player, len, &Direction::ALL)
    }

    /// Exhaustive scan restricted to the given directions, checked in order
    pub fn has_run_in(grid: &Grid, player: Player, len: usize, directions: &[Direction]) -> bool {
        directions
            .iter()
            .any(|&dir| Self::first_run(grid, player, len, dir).is_some())
    }

    /// Cells of the first run of `len` tokens owned by `player`, if any
    pub fn winning_run(grid: &Grid, player: Player, len: usize) -> Option<Vec<usize>> {
        Direction::ALL
            .iter()
            .find_map(|&dir| Self::first_run(grid, player, len, dir))
    }

    fn first_run(grid: &Grid, player: Player, len: usize, dir: Direction) -> Option<Vec<usize>> {
        if len == 0 {
            return None;
        }
        let target = player.to_cell();
        let (dr, dc) = dir.delta();
        let rows = grid.rows() as isize;
        let cols = grid.cols() as isize;
        let span = len as isize - 1;

        for row in 0..rows {
            for col in 0..cols {
                let end_row = row + dr * span;
                let end_col = col + dc * span;
                if !(0..rows).contains(&end_row) || !(0..cols).contains(&end_col) {
                    continue;
                }
                let run: Vec<usize> = (0..len as isize)
                    .map(|i| grid.index((row + dr * i) as usize, (col + dc * i) as usize))
                    .collect();
                if run.iter().all(|&idx| grid.get(idx) == target) {
                    return Some(run);
                }
            }
        }
        None
    }
}

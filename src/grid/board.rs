//! Board representation shared by the grid games

use std::fmt;

use serde::{Deserialize, Serialize};

/// A player in a two-player grid game
///
/// `A` always opens the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Turn sign: +1 for `A`, -1 for `B`
    pub fn sign(self) -> i8 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::A => Cell::A,
            Player::B => Cell::B,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    A,
    B,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::A => 'X',
            Cell::B => 'O',
        }
    }

    /// Observation encoding: 0 empty, +1 player A, -1 player B
    pub fn to_i8(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::A => 1,
            Cell::B => -1,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::A => Some(Player::A),
            Cell::B => Some(Player::B),
        }
    }
}

/// Fixed-size rectangular grid stored row-major
///
/// Row 0 is the bottom row, which is where Connect Four tokens settle first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of a (row, col) pair
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get cell at (row, col)
    pub fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Get cell at a flat index
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Place a token at a flat index, overwriting whatever was there.
    ///
    /// Legality is decided by the game rules before this is called.
    pub fn place(&mut self, index: usize, player: Player) {
        self.cells[index] = player.to_cell();
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Number of tokens owned by `player`
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Observation encoding, row-major, one `i8` per cell
    pub fn to_observation(&self) -> Vec<i8> {
        self.cells.iter().map(|c| c.to_i8()).collect()
    }

    /// Text rendering with the top row printed first
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                out.push(self.at(row, col).to_char());
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_text())
    }
}

//! Episode state machine shared by the grid games

use serde::{Deserialize, Serialize};

use super::{ConnectFour, Grid, GridRules, MatchResult, Player, TicTacToe};
use crate::{
    Result,
    env::{Environment, SpaceInfo, SpaceType, StepInfo, StepResult},
};

/// Whose point of view the scalar reward is reported from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPerspective {
    /// The acting side: a completed line is always `+win_reward` for the mover
    #[default]
    Mover,
    /// Player A: `+win_reward` when A wins, `-win_reward` when B wins
    FirstPlayer,
}

/// Reward constants for the grid games
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub win_reward: f64,
    pub draw_reward: f64,
    /// Reward for an illegal move, which also ends the episode
    pub invalid_move_reward: f64,
    pub perspective: RewardPerspective,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            win_reward: 10.0,
            draw_reward: 0.0,
            invalid_move_reward: -10.0,
            perspective: RewardPerspective::default(),
        }
    }
}

impl GridConfig {
    pub fn with_perspective(mut self, perspective: RewardPerspective) -> Self {
        self.perspective = perspective;
        self
    }

    fn win_reward_for(&self, winner: Player) -> f64 {
        match (self.perspective, winner) {
            (RewardPerspective::Mover, _) | (RewardPerspective::FirstPlayer, Player::A) => {
                self.win_reward
            }
            (RewardPerspective::FirstPlayer, Player::B) => -self.win_reward,
        }
    }
}

/// Grid game environment
///
/// An illegal action (full column, occupied cell, out-of-range index, or any
/// action after the episode ended) terminates the episode immediately with
/// `invalid_move_reward`. The engine never asks for a retry.
#[derive(Debug, Clone)]
pub struct GridEnv<R: GridRules> {
    rules: R,
    config: GridConfig,
    grid: Grid,
    to_move: Player,
    result: MatchResult,
    moves: Vec<usize>,
}

/// Connect Four on the standard 6x7 grid
pub type ConnectFourEnv = GridEnv<ConnectFour>;

/// Tic-Tac-Toe on the 3x3 grid
pub type TicTacToeEnv = GridEnv<TicTacToe>;

impl GridEnv<ConnectFour> {
    pub fn connect_four() -> Self {
        Self::new(ConnectFour::default(), GridConfig::default())
    }
}

impl GridEnv<TicTacToe> {
    pub fn tic_tac_toe() -> Self {
        Self::new(TicTacToe, GridConfig::default())
    }
}

impl<R: GridRules> GridEnv<R> {
    pub fn new(rules: R, config: GridConfig) -> Self {
        let grid = rules.empty_grid();
        Self {
            rules,
            config,
            grid,
            to_move: Player::A,
            result: MatchResult::Ongoing,
            moves: Vec::new(),
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Player whose move is next
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn result(&self) -> MatchResult {
        self.result
    }

    /// Legal actions in the current position (empty once terminal)
    pub fn valid_actions(&self) -> Vec<usize> {
        if self.result.is_terminal() {
            return Vec::new();
        }
        self.rules.valid_actions(&self.grid)
    }

    /// Accepted actions since the last reset
    pub fn history(&self) -> &[usize] {
        &self.moves
    }

    /// Text rendering of the board followed by a status line.
    ///
    /// The status is taken from the stored result, so a win on the last
    /// empty cell is reported as a win, never as a draw.
    pub fn render_text(&self) -> String {
        let status = match self.result {
            MatchResult::Ongoing => format!("{} to move", self.to_move),
            MatchResult::Win(player) => format!("{player} wins"),
            MatchResult::Draw => "draw".to_string(),
            MatchResult::Forfeit(player) => format!("{player} forfeits (illegal move)"),
        };
        format!("{}{status}\n", self.grid.render_text())
    }

    fn info(&self, invalid_move: bool) -> StepInfo {
        StepInfo {
            invalid_move,
            result: Some(self.result),
            to_move: Some(self.to_move),
            drawn_number: None,
        }
    }

    fn reject(&mut self, offender: Player) -> StepResult<Vec<i8>> {
        if !self.result.is_terminal() {
            self.result = MatchResult::Forfeit(offender);
        }
        tracing::debug!(game = self.rules.name(), %offender, "illegal move ends episode");
        StepResult {
            observation: self.grid.to_observation(),
            reward: self.config.invalid_move_reward,
            terminated: true,
            truncated: false,
            info: self.info(true),
        }
    }
}

impl<R: GridRules> Environment for GridEnv<R> {
    type Observation = Vec<i8>;
    type Action = usize;

    fn reset(&mut self, _seed: Option<u64>) -> (Vec<i8>, StepInfo) {
        self.grid.clear();
        self.to_move = Player::A;
        self.result = MatchResult::Ongoing;
        self.moves.clear();
        (self.grid.to_observation(), self.info(false))
    }

    fn step(&mut self, action: usize) -> Result<StepResult<Vec<i8>>> {
        let mover = self.to_move;
        if self.result.is_terminal() {
            return Ok(self.reject(mover));
        }

        let Some(cell) = self.rules.landing_cell(&self.grid, action) else {
            return Ok(self.reject(mover));
        };

        self.grid.place(cell, mover);
        self.moves.push(action);

        // Win takes precedence over draw when the last empty cell completes a line.
        let reward = if self.rules.has_won(&self.grid, mover) {
            self.result = MatchResult::Win(mover);
            self.config.win_reward_for(mover)
        } else if self.grid.is_full() {
            self.result = MatchResult::Draw;
            self.config.draw_reward
        } else {
            self.to_move = mover.opponent();
            0.0
        };

        let terminated = self.result.is_terminal();
        if terminated {
            tracing::debug!(game = self.rules.name(), result = ?self.result, moves = self.moves.len(), "episode finished");
        }

        Ok(StepResult {
            observation: self.grid.to_observation(),
            reward,
            terminated,
            truncated: false,
            info: self.info(false),
        })
    }

    fn observation_space(&self) -> SpaceInfo {
        SpaceInfo {
            shape: vec![self.rules.rows(), self.rules.cols()],
            space_type: SpaceType::Cells { low: -1, high: 1 },
        }
    }

    fn action_space(&self) -> SpaceInfo {
        SpaceInfo {
            shape: vec![],
            space_type: SpaceType::Discrete(self.rules.action_count()),
        }
    }
}

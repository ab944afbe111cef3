//! Baseline move choosers for driving grid episodes
//!
//! These stand in for the external training or play loop: they only ever see
//! the public environment state and return an action index.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{GridEnv, GridRules, Player};

/// Something that picks the next action for a grid episode
pub trait GridMover {
    /// Choose an action, or `None` when no legal action exists
    fn choose<R: GridRules>(&mut self, env: &GridEnv<R>) -> Option<usize>;
}

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Uniformly random legal action
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
        }
    }
}

impl GridMover for RandomMover {
    fn choose<R: GridRules>(&mut self, env: &GridEnv<R>) -> Option<usize> {
        env.valid_actions().choose(&mut self.rng).copied()
    }
}

/// Takes an immediate win, otherwise blocks the opponent's immediate win,
/// otherwise plays randomly
#[derive(Debug, Clone)]
pub struct GreedyMover {
    rng: StdRng,
}

impl GreedyMover {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
        }
    }

    fn completing_action<R: GridRules>(
        env: &GridEnv<R>,
        player: Player,
        actions: &[usize],
    ) -> Option<usize> {
        let rules = env.rules();
        actions.iter().copied().find(|&action| {
            let mut grid = env.grid().clone();
            match rules.landing_cell(&grid, action) {
                Some(cell) => {
                    grid.place(cell, player);
                    rules.has_won(&grid, player)
                }
                None => false,
            }
        })
    }
}

impl GridMover for GreedyMover {
    fn choose<R: GridRules>(&mut self, env: &GridEnv<R>) -> Option<usize> {
        let actions = env.valid_actions();
        let me = env.to_move();
        Self::completing_action(env, me, &actions)
            .or_else(|| Self::completing_action(env, me.opponent(), &actions))
            .or_else(|| actions.choose(&mut self.rng).copied())
    }
}

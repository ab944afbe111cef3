//! Shared helpers for integration tests

#![allow(dead_code)]

use arcade::{
    adapters::InMemoryRepository,
    app::{App, AppConfig},
    arena::ArenaConfig,
};

/// App backed by an in-memory repository with a short, seeded arena.
pub fn test_app(seed: u64) -> App {
    let config = AppConfig::default()
        .with_arena(ArenaConfig::default().with_time_limit(5.0))
        .with_state_path("roster");
    App::for_testing()
        .with_repository(InMemoryRepository::new())
        .with_config(config)
        .with_default_seed(seed)
        .build()
}

/// Feed `moves` to an environment one after another, returning every reward.
pub fn play_moves<E>(env: &mut E, moves: &[E::Action]) -> Vec<f64>
where
    E: arcade::Environment,
    E::Action: Clone,
{
    moves
        .iter()
        .map(|action| env.step(action.clone()).unwrap().reward)
        .collect()
}

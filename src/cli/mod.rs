//! CLI infrastructure for the arcade toolkit
//!
//! Subcommands play grid games, run roulette sessions, stage arena matches
//! between heuristic agents, and inspect persisted agent state.

pub mod commands;
pub mod output;

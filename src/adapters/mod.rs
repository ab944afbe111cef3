//! Adapters implementing domain ports.
//!
//! Repositories persist [`crate::roster::RosterSnapshot`]s; the experience
//! log observes matches.

pub mod experience_log;
pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

use std::path::Path;

pub use experience_log::{AgentSummary, ExperienceEntry, ExperienceLog};
pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonAgentRepository;
pub use msgpack_repository::MsgPackAgentRepository;

use crate::ports::AgentRepository;

/// Repository matching a snapshot path: MessagePack for `.msgpack`, JSON
/// otherwise.
pub fn repository_for(path: &Path) -> Box<dyn AgentRepository + Send + Sync> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("msgpack") => Box::new(MsgPackAgentRepository),
        _ => Box::new(JsonAgentRepository),
    }
}

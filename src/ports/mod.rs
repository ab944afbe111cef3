//! Ports (trait boundaries) for external dependencies.
//!
//! The domain owns these traits; `adapters` implements them for files,
//! memory, and logs.

pub mod observer;
pub mod repository;

pub use observer::MatchObserver;
pub use repository::AgentRepository;

//! Application layer: configuration and the dependency container.
//!
//! ```text
//!   App ──owns──▶ AgentRepository (JSON / MessagePack / in-memory)
//!    │
//!    └─builds──▶ GridEnv, RouletteEnv, MatchController, Agent
//! ```

pub mod config;
pub mod container;

pub use config::AppConfig;
pub use container::{App, AppBuilder};

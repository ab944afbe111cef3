//! Heuristic paddle agents
//!
//! Six hand-tuned policies share one capability set ([`Policy`]): pick paddle
//! moves from the arena state, and fold the outcome of each rally into a few
//! bounded metrics. [`Agent`] is the closed set of variants used for dispatch
//! and persistence.

pub mod agent;
pub mod cautious;
pub mod chaotic;
pub mod clock;
pub mod escalating;
pub mod kind;
pub mod ladder;
pub mod mood;
pub mod policy;
pub mod predictor;
pub mod tracker;
pub mod view;

pub use agent::Agent;
pub use cautious::Cautious;
pub use chaotic::Chaotic;
pub use clock::{RALLY_WINDOW, RallyClock};
pub use escalating::Escalating;
pub use kind::AgentKind;
pub use ladder::Ladder;
pub use mood::{Mood, Sentiment};
pub use policy::{AgentCore, Experience, Policy};
pub use predictor::Predictor;
pub use tracker::Tracker;
pub use view::{PaddleCommand, PaddleView};

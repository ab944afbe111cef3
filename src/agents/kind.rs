//! Registry of agent identifiers

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Agent, Cautious, Chaotic, Escalating, Ladder, Predictor, Tracker};
use crate::{Error, Result};

/// The closed set of heuristic agent variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Tracker,
    Predictor,
    Chaotic,
    Cautious,
    Escalating,
    Ladder,
}

impl AgentKind {
    pub const ALL: [AgentKind; 6] = [
        AgentKind::Tracker,
        AgentKind::Predictor,
        AgentKind::Chaotic,
        AgentKind::Cautious,
        AgentKind::Escalating,
        AgentKind::Ladder,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AgentKind::Tracker => "tracker",
            AgentKind::Predictor => "predictor",
            AgentKind::Chaotic => "chaotic",
            AgentKind::Cautious => "cautious",
            AgentKind::Escalating => "escalating",
            AgentKind::Ladder => "ladder",
        }
    }

    /// Short legacy names accepted in addition to [`AgentKind::id`]
    pub fn alias(self) -> Option<&'static str> {
        match self {
            AgentKind::Tracker => Some("iad"),
            AgentKind::Chaotic => Some("iaa"),
            AgentKind::Escalating => Some("iaj"),
            AgentKind::Ladder => Some("iaf"),
            AgentKind::Predictor | AgentKind::Cautious => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AgentKind::Tracker => "chases the ball's current height",
            AgentKind::Predictor => "aims at the predicted intercept, bounces included",
            AgentKind::Chaotic => "random bursts, ignores the ball",
            AgentKind::Cautious => "slow drift with rare direction changes",
            AgentKind::Escalating => "grows faster and taller over time, vengeful",
            AgentKind::Ladder => "several stacked paddles around a lead paddle",
        }
    }

    /// A default-initialised agent of this kind.
    ///
    /// `seed` drives the random variants and is ignored by the others.
    pub fn build(self, seed: u64) -> Agent {
        match self {
            AgentKind::Tracker => Agent::Tracker(Tracker::default()),
            AgentKind::Predictor => Agent::Predictor(Predictor::default()),
            AgentKind::Chaotic => Agent::Chaotic(Chaotic::new(seed)),
            AgentKind::Cautious => Agent::Cautious(Cautious::new(seed)),
            AgentKind::Escalating => Agent::Escalating(Escalating::default()),
            AgentKind::Ladder => Agent::Ladder(Ladder::default()),
        }
    }

    fn expected() -> String {
        Self::ALL.map(AgentKind::id).join(", ")
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == needle || kind.alias() == Some(needle.as_str()))
            .ok_or_else(|| Error::UnknownAgent {
                id: s.to_string(),
                expected: Self::expected(),
            })
    }
}

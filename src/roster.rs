//! Persisted agent state.
//!
//! A roster maps a slot name (usually the agent identifier) to the agent's
//! full learned state. It is read once at start-up and written at
//! checkpoints; the last writer wins.

use std::{collections::BTreeMap, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    agents::{Agent, AgentKind, Policy},
    ports::AgentRepository,
};

/// Versioned snapshot of every persisted agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub version: u32,
    pub agents: BTreeMap<String, Agent>,
}

impl RosterSnapshot {
    pub const VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            agents: BTreeMap::new(),
        }
    }

    /// Reject snapshots written by an incompatible format version.
    pub fn check_version(&self) -> Result<()> {
        if self.version == Self::VERSION {
            Ok(())
        } else {
            Err(Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            })
        }
    }

    /// Load a roster, treating any failure as an empty roster.
    ///
    /// A missing file is expected on first run and logged at debug level;
    /// malformed or incompatible snapshots are logged as warnings.
    pub fn load_or_default(repository: &dyn AgentRepository, path: &Path) -> Self {
        match repository.load(path).and_then(|roster| {
            roster.check_version()?;
            Ok(roster)
        }) {
            Ok(roster) => {
                tracing::info!(?path, agents = roster.len(), "loaded agent snapshot");
                roster
            }
            Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(?path, "no agent snapshot yet, starting fresh");
                Self::new()
            }
            Err(err) => {
                tracing::warn!(?path, error = %err, "ignoring agent snapshot, using defaults");
                Self::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, slot: &str) -> Option<&Agent> {
        self.agents.get(slot)
    }

    /// Stored agent for `slot`, or a fresh agent of `kind`.
    ///
    /// A stored agent of a different kind is replaced by a fresh one.
    pub fn agent_or_default(&self, slot: &str, kind: AgentKind, seed: u64) -> Agent {
        match self.agents.get(slot) {
            Some(agent) if agent.kind() == kind => agent.clone(),
            _ => kind.build(seed),
        }
    }

    pub fn insert(&mut self, slot: impl Into<String>, agent: Agent) {
        self.agents.insert(slot.into(), agent);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Agent)> {
        self.agents.iter().map(|(slot, agent)| (slot.as_str(), agent))
    }
}

impl Default for RosterSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

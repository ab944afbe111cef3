//! JSON implementation of the agent repository.
//!
//! The default snapshot format: human-readable, one tagged record per agent.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::AgentRepository, roster::RosterSnapshot};

/// Pretty-printed JSON roster files
///
/// # Examples
///
/// ```no_run
/// use arcade::adapters::JsonAgentRepository;
/// use arcade::ports::AgentRepository;
/// use arcade::roster::RosterSnapshot;
/// use std::path::Path;
///
/// let repo = JsonAgentRepository::new();
/// repo.save(&RosterSnapshot::new(), Path::new("agents.json"))?;
/// let loaded = repo.load(Path::new("agents.json"))?;
/// # Ok::<(), arcade::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAgentRepository;

impl JsonAgentRepository {
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for JsonAgentRepository {
    fn save(&self, roster: &RosterSnapshot, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, roster)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;
        tracing::debug!(?path, agents = roster.len(), "saved agent snapshot");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<RosterSnapshot> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let roster = serde_json::from_reader(BufReader::new(file))?;
        Ok(roster)
    }
}

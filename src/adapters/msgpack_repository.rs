//! MessagePack implementation of the agent repository.
//!
//! Compact binary snapshots via rmp_serde, selected by a `.msgpack` extension.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, ports::AgentRepository, roster::RosterSnapshot};

/// MessagePack-based agent repository.
///
/// Agents are internally tagged enums, so the encoder writes struct maps
/// rather than positional arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackAgentRepository;

impl MsgPackAgentRepository {
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for MsgPackAgentRepository {
    fn save(&self, roster: &RosterSnapshot, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write_named(&mut file, roster).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize roster to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        tracing::debug!(?path, agents = roster.len(), "saved agent snapshot");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<RosterSnapshot> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
            operation: "deserialize roster from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::agents::{AgentKind, Policy};

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("agents.msgpack");

        let mut roster = RosterSnapshot::new();
        for kind in AgentKind::ALL {
            let mut agent = kind.build(17);
            agent.register_rally(90);
            agent.on_rally_end(1);
            roster.insert(kind.id(), agent);
        }

        let repo = MsgPackAgentRepository::new();
        repo.save(&roster, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, roster);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = MsgPackAgentRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_12345.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackAgentRepository::new();
        let result = repo.save(
            &RosterSnapshot::new(),
            Path::new("/invalid_dir_12345/file.msgpack"),
        );
        assert!(result.is_err());
    }
}

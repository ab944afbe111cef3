//! Repository port for agent roster persistence.

use std::path::Path;

use crate::{Result, roster::RosterSnapshot};

/// Port for persisting and loading agent rosters.
///
/// Implementations decide the wire format (JSON, MessagePack, memory); the
/// roster itself is format-agnostic.
///
/// # Examples
///
/// ```no_run
/// use arcade::ports::AgentRepository;
/// use arcade::roster::RosterSnapshot;
/// use std::path::Path;
///
/// fn checkpoint<R: AgentRepository>(repo: &R, roster: &RosterSnapshot) -> arcade::Result<()> {
///     repo.save(roster, Path::new("agents.json"))
/// }
/// ```
pub trait AgentRepository {
    /// Save a roster, replacing whatever was stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be created or written to
    /// - Serialization fails
    fn save(&self, roster: &RosterSnapshot, path: &Path) -> Result<()>;

    /// Load a roster.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing is stored at `path`
    /// - The stored bytes are not a roster
    fn load(&self, path: &Path) -> Result<RosterSnapshot>;
}

//! Application configuration loaded from a JSON file.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    Result, arena::ArenaConfig, error::Error, grid::GridConfig, roulette::RouletteConfig,
};

/// Settings for every game plus the agent snapshot location.
///
/// Every field is optional in the file; missing fields keep their defaults.
///
/// # Examples
///
/// ```
/// use arcade::app::AppConfig;
///
/// let config = AppConfig::default()
///     .with_seed(Some(42))
///     .with_state_path("agents.msgpack");
/// assert_eq!(config.arena.time_limit_secs, 120.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub roulette: RouletteConfig,
    pub arena: ArenaConfig,
    /// Agent roster file; `.msgpack` selects MessagePack, anything else JSON
    pub state_path: PathBuf,
    /// Seed for every random source (None = non-deterministic)
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            roulette: RouletteConfig::default(),
            arena: ArenaConfig::default(),
            state_path: PathBuf::from("agents.json"),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Read and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        tracing::debug!(?path, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.roulette.validate()?;
        self.arena.validate()
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    pub fn with_arena(mut self, arena: ArenaConfig) -> Self {
        self.arena = arena;
        self
    }

    pub fn with_roulette(mut self, roulette: RouletteConfig) -> Self {
        self.roulette = roulette;
        self
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("arcade.json");
        std::fs::write(
            &path,
            r#"{ "seed": 7, "arena": { "time_limit_secs": 30.0 }, "roulette": { "stake": 2.0 } }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.arena.time_limit_secs, 30.0);
        assert_eq!(config.arena.width, 800.0);
        assert_eq!(config.roulette.stake, 2.0);
        assert_eq!(config.roulette.initial_balance, 100.0);
        assert_eq!(config.grid, GridConfig::default());
        assert_eq!(config.state_path, PathBuf::from("agents.json"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("arcade.json");
        std::fs::write(&path, r#"{ "roulette": { "direct_number": 40 } }"#).unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            AppConfig::load("/nonexistent/arcade.json"),
            Err(Error::Io { .. })
        ));
    }
}

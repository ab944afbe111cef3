//! Dependency injection container for the arcade application.
//!
//! The container owns the agent repository and the configuration, and is the
//! factory for environments, agents, and match controllers.

use std::sync::Arc;

use super::config::AppConfig;
use crate::{
    Result,
    adapters::repository_for,
    agents::{Agent, AgentKind},
    grid::{ConnectFour, ConnectFourEnv, GridEnv, TicTacToe, TicTacToeEnv},
    pipeline::MatchController,
    ports::AgentRepository,
    roster::RosterSnapshot,
    roulette::RouletteEnv,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use arcade::app::{App, AppConfig};
///
/// let app = App::with_config(AppConfig::load("arcade.json")?);
/// let roster = app.load_roster();
/// let tracker = app.agent(&roster, "iad")?;
/// # Ok::<(), arcade::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use arcade::app::App;
/// use arcade::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for roster persistence
    repository: Arc<dyn AgentRepository + Send + Sync>,
    config: AppConfig,
}

impl App {
    /// Create an app with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create an app whose repository matches `config.state_path`.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            repository: Arc::from(repository_for(&config.state_path)),
            config,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn repository(&self) -> Arc<dyn AgentRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Configured seed, or a fresh random one.
    pub fn seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(rand::random)
    }

    /// Roster at the configured state path; empty if missing or unreadable.
    pub fn load_roster(&self) -> RosterSnapshot {
        RosterSnapshot::load_or_default(self.repository.as_ref(), &self.config.state_path)
    }

    pub fn save_roster(&self, roster: &RosterSnapshot) -> Result<()> {
        self.repository.save(roster, &self.config.state_path)?;
        tracing::info!(
            path = ?self.config.state_path,
            agents = roster.len(),
            "saved agent snapshot"
        );
        Ok(())
    }

    /// Agent for an identifier or alias, restored from `roster` when present.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownAgent`] for an identifier outside the registry.
    pub fn agent(&self, roster: &RosterSnapshot, id: &str) -> Result<Agent> {
        let kind: AgentKind = id.parse()?;
        Ok(roster.agent_or_default(kind.id(), kind, self.seed()))
    }

    pub fn connect_four(&self) -> ConnectFourEnv {
        GridEnv::new(ConnectFour::default(), self.config.grid)
    }

    pub fn tic_tac_toe(&self) -> TicTacToeEnv {
        GridEnv::new(TicTacToe, self.config.grid)
    }

    pub fn roulette(&self) -> Result<RouletteEnv> {
        RouletteEnv::uniform(self.config.roulette.clone(), self.config.seed)
    }

    pub fn match_controller(&self) -> MatchController {
        MatchController::new(self.config.arena.clone()).with_seed(self.config.seed)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
pub struct AppBuilder {
    repository: Option<Arc<dyn AgentRepository + Send + Sync>>,
    config: AppConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            config: AppConfig::default(),
        }
    }

    /// Set a custom agent repository.
    pub fn with_repository<R: AgentRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed every agent, environment, and arena built by the app.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the app.
    ///
    /// Without an explicit repository, the state path's extension picks one.
    pub fn build(self) -> App {
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::from(repository_for(&self.config.state_path)));
        App {
            repository,
            config: self.config,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

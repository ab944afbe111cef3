//! Error types for the arcade crate

use thiserror::Error;

/// Main error type for the arcade crate
///
/// Illegal grid moves are not represented here: they end the episode with a
/// penalty reward instead of failing the call.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown agent '{id}' (expected one of: {expected})")]
    UnknownAgent { id: String, expected: String },

    #[error("unknown game '{name}' (expected one of: {expected})")]
    UnknownGame { name: String, expected: String },

    #[error("unknown bet '{name}' (expected one of: {expected})")]
    UnknownBet { name: String, expected: String },

    #[error("bet vector has {got} flags, expected {expected}")]
    InvalidBetVector { expected: usize, got: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("agent '{agent}' returned {got} paddle moves for {expected} paddles")]
    PaddleCountMismatch {
        agent: String,
        expected: usize,
        got: usize,
    },

    #[error("episode already finished; call reset() first")]
    EpisodeFinished,

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshotVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Shorthand for [`Error::InvalidConfiguration`].
    pub fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

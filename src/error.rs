//! Error types for game logic and persistence.

use derive_more::{Display, Error};

/// Contract violations inside the game logic.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// An operation was requested in a state that cannot support it.
    #[display("invalid game state: {reason}")]
    InvalidState {
        /// What made the state invalid.
        reason: String,
    },
    /// A board index outside 0..9.
    #[display("cell index {index} is outside the 3x3 board")]
    CellOutOfRange {
        /// The offending index.
        index: usize,
    },
}

impl GameError {
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }
}

/// Failures of a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Debug, Display, Error)]
pub enum StorageError {
    #[display("storage I/O error: {source}")]
    Io { source: std::io::Error },
    #[display("storage serialization error: {source}")]
    Json { source: serde_json::Error },
    #[display("invalid storage key {key:?}")]
    InvalidKey { key: String },
}

impl From<std::io::Error> for StorageError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

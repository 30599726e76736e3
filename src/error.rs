//! Error types.
//!
//! Only configuration and persistence can fail. Invalid player input is
//! never an error: rejected activations simply produce no events.

use thiserror::Error;

/// Errors raised while building a session configuration or grid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Rows or columns of zero.
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: usize, columns: usize },

    /// An explicit pair assignment that does not describe a valid grid.
    #[error("invalid pair layout: {0}")]
    InvalidLayout(String),

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config text could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons a stored snapshot could not be loaded.
#[derive(Debug, Error)]
pub enum LoadFailure {
    /// Nothing has been saved yet.
    #[error("no snapshot saved")]
    Missing,

    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt snapshot: {0}")]
    CorruptJson(#[from] serde_json::Error),

    #[error("corrupt snapshot: {0}")]
    CorruptBinary(#[from] bincode::Error),

    /// Parsed, but the fields disagree with each other.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}

/// Errors raised while writing a snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode snapshot: {0}")]
    EncodeJson(#[from] serde_json::Error),

    #[error("failed to encode snapshot: {0}")]
    EncodeBinary(#[from] bincode::Error),

    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

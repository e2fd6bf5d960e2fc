//! Session-level error types
//!
//! Per-frame geometry never fails (missing data degrades to neutral values).
//! Only collaborator failures end up here.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed landmark frame on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON encoding error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Malformed status file {}: {source}", path.display())]
    Status {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TrackerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

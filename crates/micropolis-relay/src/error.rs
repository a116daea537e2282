//! Error types for the relay

use std::path::PathBuf;
use thiserror::Error;

/// Errors from relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Unsupported CPU architecture: {0}")]
    UnsupportedArch(String),

    #[error("Sim executable not found: {}", .0.display())]
    MissingExecutable(PathBuf),

    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Relay is stopped")]
    Stopped,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RelayResult<T> = Result<T, RelayError>;

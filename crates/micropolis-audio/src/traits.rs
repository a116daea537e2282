//! Playback trait and errors

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from sound playback
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Failed to open sound file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode sound file {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Audio backend unavailable")]
    BackendUnavailable,

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

pub type AudioResult<T> = Result<T, AudioError>;

/// Fire-and-forget playback of one audio file.
///
/// Implementations must not block the caller for the duration of the
/// sound; the relay calls this from its reader loop between line reads.
/// Playback failures are the caller's to report - they never crash.
pub trait SoundPlayer: Send + Sync {
    fn play(&self, path: &Path) -> AudioResult<()>;
}

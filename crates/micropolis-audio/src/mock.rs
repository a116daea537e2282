//! Mock sound player for testing

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::{AudioError, AudioResult, SoundPlayer};

/// Mock player for unit/integration testing.
///
/// Records every requested path; can be configured to fail so callers'
/// failure isolation can be exercised.
#[derive(Clone, Default)]
pub struct MockPlayer {
    played: Arc<Mutex<Vec<PathBuf>>>,

    /// Configure play to fail
    pub fail_play: Arc<Mutex<bool>>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths requested so far, in call order
    pub fn played(&self) -> Vec<PathBuf> {
        self.played.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockPlayer {
    fn play(&self, path: &Path) -> AudioResult<()> {
        if *self.fail_play.lock().unwrap() {
            return Err(AudioError::PlaybackFailed("Mock playback failure".into()));
        }

        self.played.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

//! rodio-backed playback

use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{AudioError, AudioResult, SoundPlayer};

type LoadedSource = Decoder<BufReader<File>>;

/// Real playback backend.
///
/// rodio's output stream handle is not `Send`, so a dedicated playback
/// thread owns it for the lifetime of the player. `play` opens and decodes
/// the file on the calling thread - a missing or corrupt file is reported
/// to the caller - then hands the decoded source to the playback thread.
/// Sounds overlap freely; each one plays once on a detached sink.
pub struct RodioPlayer {
    tx: mpsc::UnboundedSender<LoadedSource>,
}

impl RodioPlayer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || playback_thread(rx));

        Self { tx }
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&self, path: &Path) -> AudioResult<()> {
        let file = File::open(path).map_err(|e| AudioError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // The receiver only goes away if the backend never came up.
        self.tx
            .send(source)
            .map_err(|_| AudioError::BackendUnavailable)?;

        debug!(path = %path.display(), "Queued sound for playback");
        Ok(())
    }
}

fn playback_thread(mut rx: mpsc::UnboundedReceiver<LoadedSource>) {
    // Keep the stream alive for the thread's lifetime; sinks reference it.
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            warn!(error = %e, "No audio output available, sounds disabled");
            return;
        }
    };

    while let Some(source) = rx.blocking_recv() {
        match Sink::try_new(&handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(e) => warn!(error = %e, "Failed to create audio sink"),
        }
    }
}

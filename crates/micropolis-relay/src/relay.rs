//! The relay: one child process, one reader loop, one send path

use micropolis_audio::SoundPlayer;
use micropolis_proto::{parse_line, HostMessage, SimCommand};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::ChildStdin;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    Arch, BundleLayout, LaunchOptions, RelayError, RelayEvent, RelayResult, SimProcess,
};

/// How long shutdown waits for the sim after SIGUSR1 before killing it
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Relay lifecycle. Construction is the launch; there is no way back to
/// `Running` once stopped - a relay is single-use per child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Running,
    Stopped,
}

/// Owns the sim process and its line-protocol streams.
///
/// The stdout half belongs exclusively to the background reader task; the
/// stdin half belongs to the control path via [`Relay::send`]. No other
/// actor may touch either stream.
pub struct Relay {
    layout: BundleLayout,
    process: SimProcess,
    stdin: Arc<Mutex<ChildStdin>>,
    reader: Option<JoinHandle<()>>,
    event_rx: StdMutex<Option<mpsc::UnboundedReceiver<RelayEvent>>>,
    state: RelayState,
}

impl Relay {
    /// Launch the sim and start the reader loop.
    ///
    /// Fails fast on an unsupported architecture or a missing executable,
    /// before any process is spawned. Must be called from within a tokio
    /// runtime; the reader task starts immediately.
    pub fn launch(options: LaunchOptions, player: Arc<dyn SoundPlayer>) -> RelayResult<Self> {
        let arch = match options.arch {
            Some(arch) => arch,
            None => Arch::detect()?,
        };
        let layout = BundleLayout::new(options.bundle_dir.clone(), arch);

        let mut process = SimProcess::spawn(&layout, &options)?;

        let stdout = process
            .take_stdout()
            .ok_or_else(|| RelayError::SpawnFailed("Sim stdout was not piped".into()))?;
        let stdin = process
            .take_stdin()
            .ok_or_else(|| RelayError::SpawnFailed("Sim stdin was not piped".into()))?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let reader = tokio::spawn(read_loop(
            BufReader::new(stdout),
            layout.clone(),
            player,
            event_tx,
        ));

        info!(pid = process.pid(), arch = %arch, bundle = %layout.root().display(), "Sim launched");

        Ok(Self {
            layout,
            process,
            stdin: Arc::new(Mutex::new(stdin)),
            reader: Some(reader),
            event_rx: StdMutex::new(Some(event_rx)),
            state: RelayState::Running,
        })
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn layout(&self) -> &BundleLayout {
        &self.layout
    }

    pub fn pid(&self) -> u32 {
        self.process.pid()
    }

    /// Subscribe to relay events
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<RelayEvent> {
        self.event_rx
            .lock()
            .unwrap()
            .take()
            .expect("subscribe() can only be called once")
    }

    /// Write one string verbatim to the sim's stdin. The caller includes
    /// the line terminator. A broken pipe surfaces as an error; callers
    /// at shutdown treat that as best-effort and ignore it.
    pub async fn send(&self, line: &str) -> RelayResult<()> {
        if self.state == RelayState::Stopped {
            return Err(RelayError::Stopped);
        }

        let mut stdin = self.stdin.lock().await;
        stdin.write_all(line.as_bytes()).await?;
        stdin.flush().await?;
        Ok(())
    }

    /// Notify the sim of the startup URI
    pub async fn send_startup(&self, uri: &str) -> RelayResult<()> {
        self.send(&HostMessage::StartUp { uri: uri.into() }.to_line())
            .await
    }

    /// Notify the sim of the user's nickname
    pub async fn send_nickname(&self, nick: &str) -> RelayResult<()> {
        self.send(&HostMessage::NickName { nick: nick.into() }.to_line())
            .await
    }

    /// Notify the sim that the activity was shared
    pub async fn share(&self) -> RelayResult<()> {
        self.send(&HostMessage::Share.to_line()).await
    }

    /// Notify the sim that the host window gained focus
    pub async fn activate(&self) -> RelayResult<()> {
        self.send(&HostMessage::Activate.to_line()).await
    }

    /// Notify the sim that the host window lost focus
    pub async fn deactivate(&self) -> RelayResult<()> {
        self.send(&HostMessage::Deactivate.to_line()).await
    }

    /// Tear the relay down: signal the sim, bounded-wait for it, then
    /// join the reader loop. Unconditional best-effort; every failure on
    /// this path is swallowed. Idempotent.
    pub async fn shutdown(&mut self) {
        self.stop(true).await
    }

    /// Teardown for a close that originated from the sim itself
    /// (`QuitMicropolis`): the child is already exiting, so the quit
    /// signal is skipped.
    pub async fn shutdown_from_child(&mut self) {
        self.stop(false).await
    }

    async fn stop(&mut self, signal_child: bool) {
        if self.state == RelayState::Stopped {
            return;
        }
        self.state = RelayState::Stopped;

        if signal_child {
            self.process.signal_quit();
        }
        self.process.wait_or_kill(SHUTDOWN_GRACE).await;

        // The sim is gone, so its stdout is closed and the loop ends on
        // its own; the timeout only guards against a wedged pipe.
        if let Some(reader) = self.reader.take() {
            let _ = tokio::time::timeout(Duration::from_secs(1), reader).await;
        }

        debug!("Relay stopped");
    }
}

/// Reader loop over the sim's stdout.
///
/// Suspends only inside the line read; dispatch between reads never
/// blocks. A failed read (EOF, child exit, I/O error) ends the loop
/// cleanly - that is the expected end of life, never a crash. Dispatch
/// failures are isolated: a playback error is logged and the loop keeps
/// reading.
async fn read_loop<R>(
    reader: R,
    layout: BundleLayout,
    player: Arc<dyn SoundPlayer>,
    events: mpsc::UnboundedSender<RelayEvent>,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => dispatch(&line, &layout, player.as_ref(), &events),
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "Sim output read failed");
                break;
            }
        }
    }

    debug!("Sim output closed, reader loop done");
    let _ = events.send(RelayEvent::Closed);
}

fn dispatch(
    line: &str,
    layout: &BundleLayout,
    player: &dyn SoundPlayer,
    events: &mpsc::UnboundedSender<RelayEvent>,
) {
    let Some(command) = parse_line(line) else {
        // Blank line: discarded, not an error.
        return;
    };

    match command {
        SimCommand::PlaySound { name } => {
            let path = layout.sound_path(&name);
            if let Err(e) = player.play(&path) {
                warn!(sound = %name, path = %path.display(), error = %e, "Sound playback skipped");
            }
        }
        SimCommand::Quit => {
            info!("Sim requested quit");
            let _ = events.send(RelayEvent::QuitRequested);
        }
        SimCommand::Unrecognized { command } => {
            debug!(command = %command, "Ignoring unrecognized sim command");
        }
    }
}

//! Sim process launch and termination

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use crate::{Arch, BundleLayout, RelayError, RelayResult};

/// Options for launching the sim
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Bundle/installation root directory
    pub bundle_dir: PathBuf,

    /// Explicit architecture; probed from the machine when `None`
    pub arch: Option<Arch>,

    /// Window identifier from the embedding toolkit, if any
    pub window_id: Option<String>,

    /// Bind the sim to the embedding window via `-R`. Off by default;
    /// the sim's root-window binding is currently unreliable.
    pub bind_root_window: bool,
}

impl LaunchOptions {
    pub fn new(bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            arch: None,
            window_id: None,
            bind_root_window: false,
        }
    }
}

/// Normalize a window identifier from the embedding toolkit.
/// Some toolkits render the numeric id as a long literal with a trailing
/// `L`; the sim wants the bare digits.
pub fn normalize_window_id(raw: &str) -> String {
    raw.strip_suffix('L').unwrap_or(raw).to_string()
}

/// Build the sim's argument vector. `-t` requests interactive line mode;
/// `-R <win>` binds to the embedding window when enabled.
pub fn build_argv(options: &LaunchOptions) -> Vec<String> {
    let mut argv = Vec::new();

    if options.bind_root_window {
        if let Some(win) = &options.window_id {
            argv.push("-R".to_string());
            argv.push(normalize_window_id(win));
        }
    }

    argv.push("-t".to_string());
    argv
}

/// Owned sim process with piped stdio.
///
/// Created once per relay; the streams are taken by the relay at launch
/// and never touched here again.
pub struct SimProcess {
    child: Child,
    pid: u32,
}

impl SimProcess {
    /// Spawn the sim with its working directory set to the bundle root
    /// and the bundle environment passed explicitly. The child's lifetime
    /// is not awaited here.
    pub fn spawn(layout: &BundleLayout, options: &LaunchOptions) -> RelayResult<Self> {
        let executable = layout.sim_executable();
        if !executable.exists() {
            return Err(RelayError::MissingExecutable(executable));
        }

        let mut cmd = Command::new(&executable);
        cmd.args(build_argv(options))
            .current_dir(layout.root())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true);

        for (key, value) in layout.spawn_env() {
            cmd.env(key, value);
        }

        let child = cmd.spawn().map_err(|e| {
            RelayError::SpawnFailed(format!("Failed to spawn {}: {}", executable.display(), e))
        })?;

        let pid = child.id().ok_or_else(|| {
            RelayError::SpawnFailed("Sim exited before a pid was assigned".into())
        })?;

        debug!(pid = pid, executable = %executable.display(), "Sim spawned");

        Ok(Self { child, pid })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Ask the sim to quit by delivering SIGUSR1. Best-effort: a child
    /// that is already gone, or any delivery failure, is ignored.
    pub fn signal_quit(&self) {
        let pid = Pid::from_raw(self.pid as i32);

        match signal::kill(pid, Signal::SIGUSR1) {
            Ok(()) => debug!(pid = self.pid, "Sent SIGUSR1 to sim"),
            Err(nix::errno::Errno::ESRCH) => {
                // Process already gone
            }
            Err(e) => debug!(pid = self.pid, error = %e, "Quit signal not delivered"),
        }
    }

    /// Wait for the sim to exit, force-killing it after the timeout.
    /// Never fails; teardown is unconditional.
    pub async fn wait_or_kill(&mut self, timeout: Duration) {
        match tokio::time::timeout(timeout, self.child.wait()).await {
            Ok(Ok(status)) => debug!(pid = self.pid, status = ?status, "Sim exited"),
            Ok(Err(e)) => debug!(pid = self.pid, error = %e, "Wait for sim failed"),
            Err(_) => {
                warn!(pid = self.pid, "Sim did not exit in time, killing");
                let _ = self.child.start_kill();
                let _ = self.child.wait().await;
            }
        }
    }
}

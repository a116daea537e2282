//! Integration tests for the relay
//!
//! These spawn real child processes from scratch bundle directories. The
//! sim is stood in for by small shell scripts placed where the layout
//! expects the architecture-specific binary.

use micropolis_audio::{MockPlayer, SoundPlayer};
use micropolis_relay::{Arch, LaunchOptions, Relay, RelayError, RelayEvent, RelayState};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Create a scratch bundle whose sim binary is the given shell script
fn make_bundle(script: &str) -> (TempDir, LaunchOptions) {
    let dir = tempfile::tempdir().unwrap();

    let res = dir.path().join("res");
    std::fs::create_dir_all(&res).unwrap();

    let exe = res.join(format!("sim.{}", Arch::X86_64.label()));
    std::fs::write(&exe, format!("#!/bin/sh\n{}\n", script)).unwrap();
    std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut options = LaunchOptions::new(dir.path());
    options.arch = Some(Arch::X86_64);
    (dir, options)
}

fn player() -> (Arc<MockPlayer>, Arc<dyn SoundPlayer>) {
    let mock = Arc::new(MockPlayer::new());
    (mock.clone(), mock)
}

async fn recv_event(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<RelayEvent>,
) -> Option<RelayEvent> {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("Timed out waiting for relay event")
}

#[tokio::test]
async fn sim_output_drives_playback_and_quit() {
    let (dir, options) = make_bundle(
        r#"echo "PlaySound Honk"
echo "FrobnicateWidget 1 2"
echo ""
echo "QuitMicropolis"
cat >/dev/null"#,
    );
    let (mock, player) = player();

    let mut relay = Relay::launch(options, player).unwrap();
    let mut rx = relay.subscribe();

    assert_eq!(recv_event(&mut rx).await, Some(RelayEvent::QuitRequested));

    assert_eq!(
        mock.played(),
        vec![dir.path().join("res").join("sounds").join("honk.wav")]
    );

    relay.shutdown().await;
    assert_eq!(relay.state(), RelayState::Stopped);
}

#[tokio::test]
async fn send_reaches_the_sim_verbatim_with_the_bundle_env() {
    // The script resolves its output path through SINHOME, so this also
    // verifies the explicit spawn environment.
    let (dir, options) = make_bundle(
        r#"read line
printf '%s' "$line" > "$SINHOME/received.txt""#,
    );
    let (_mock, player) = player();

    let mut relay = Relay::launch(options, player).unwrap();
    let mut rx = relay.subscribe();

    relay.send_nickname("Ann").await.unwrap();

    // The script exits after one line; wait for the stream to close.
    assert_eq!(recv_event(&mut rx).await, Some(RelayEvent::Closed));

    let received = std::fs::read_to_string(dir.path().join("received.txt")).unwrap();
    assert_eq!(received, "SugarNickName \"Ann\"");

    relay.shutdown().await;
}

#[tokio::test]
async fn child_exit_emits_closed_and_nothing_else() {
    let (_dir, options) = make_bundle("exit 0");
    let (mock, player) = player();

    let mut relay = Relay::launch(options, player).unwrap();
    let mut rx = relay.subscribe();

    assert_eq!(recv_event(&mut rx).await, Some(RelayEvent::Closed));
    assert!(mock.played().is_empty());

    // Shutdown after the child is already gone still succeeds.
    relay.shutdown().await;
    assert_eq!(relay.state(), RelayState::Stopped);
}

#[tokio::test]
async fn child_originated_close_skips_the_quit_signal() {
    let (_dir, options) = make_bundle(r#"echo "QuitMicropolis""#);
    let (_mock, player) = player();

    let mut relay = Relay::launch(options, player).unwrap();
    let mut rx = relay.subscribe();

    assert_eq!(recv_event(&mut rx).await, Some(RelayEvent::QuitRequested));

    // The sim exits on its own; teardown must not signal it again and
    // must still always succeed.
    relay.shutdown_from_child().await;
    assert_eq!(relay.state(), RelayState::Stopped);
}

#[tokio::test]
async fn send_after_shutdown_is_rejected() {
    let (_dir, options) = make_bundle("cat >/dev/null");
    let (_mock, player) = player();

    let mut relay = Relay::launch(options, player).unwrap();
    relay.shutdown().await;

    assert!(matches!(
        relay.share().await,
        Err(RelayError::Stopped)
    ));
}

#[tokio::test]
async fn missing_executable_fails_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = LaunchOptions::new(dir.path());
    options.arch = Some(Arch::X86_64);
    let (_mock, player) = player();

    match Relay::launch(options, player) {
        Err(RelayError::MissingExecutable(path)) => {
            assert_eq!(
                path,
                PathBuf::from(dir.path()).join("res").join("sim.x86-64")
            );
        }
        other => panic!("Expected MissingExecutable, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn quit_signal_terminates_an_idle_sim() {
    // No quit from the sim; the host tears it down with SIGUSR1.
    let (_dir, options) = make_bundle("cat >/dev/null");
    let (_mock, player) = player();

    let mut relay = Relay::launch(options, player).unwrap();
    let mut rx = relay.subscribe();

    relay.shutdown().await;
    assert_eq!(relay.state(), RelayState::Stopped);

    // The reader loop observed the stream closing.
    assert_eq!(recv_event(&mut rx).await, Some(RelayEvent::Closed));
}

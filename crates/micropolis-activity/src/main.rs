//! micropolis-activity - desktop-shell host for the Micropolis sim
//!
//! This is the main entry point for the activity host. It wires together:
//! - Profile loading
//! - The sound player (rodio)
//! - The relay owning the sim process
//! - Signal handling and the main event loop

use anyhow::{Context, Result};
use clap::Parser;
use micropolis_audio::RodioPlayer;
use micropolis_config::{default_profile_path, load_profile};
use micropolis_relay::{LaunchOptions, Relay, RelayEvent};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Desktop-shell host for the Micropolis simulation
#[derive(Parser, Debug)]
#[command(name = "micropolis-activity")]
#[command(about = "Launches the Micropolis sim and relays its commands", long_about = None)]
struct Args {
    /// Startup URI handed to the activity
    uri: Option<String>,

    /// Profile file path (default: ~/.config/micropolis-activity/profile.toml)
    #[arg(short, long, default_value_os_t = default_profile_path())]
    config: PathBuf,

    /// Bundle directory override (or set MICROPOLIS_BUNDLE_PATH env var)
    #[arg(short, long, env = "MICROPOLIS_BUNDLE_PATH")]
    bundle_dir: Option<PathBuf>,

    /// Nickname override
    #[arg(short, long)]
    nickname: Option<String>,

    /// Window identifier from the embedding toolkit
    #[arg(short, long)]
    window_id: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "micropolis-activity starting"
    );

    // Load profile
    let profile = load_profile(&args.config)
        .with_context(|| format!("Failed to load profile from {:?}", args.config))?;

    let bundle_dir = args
        .bundle_dir
        .clone()
        .unwrap_or_else(|| profile.resolve_bundle_dir());
    let nickname = args
        .nickname
        .clone()
        .unwrap_or_else(|| profile.resolve_nickname());
    let uri = args.uri.clone().unwrap_or_default();

    info!(bundle = %bundle_dir.display(), "Bundle directory resolved");

    // Launch the sim
    let mut options = LaunchOptions::new(bundle_dir);
    options.window_id = args.window_id.clone();

    let player = Arc::new(RodioPlayer::new());
    let mut relay = Relay::launch(options, player).context("Failed to launch the sim")?;
    let mut events = relay.subscribe();

    // Startup parameters are best-effort: a sim that dies this early is
    // noticed by the event loop, not here.
    if let Err(e) = relay.send_startup(&uri).await {
        warn!(error = %e, "Failed to send startup URI");
    }
    if let Err(e) = relay.send_nickname(&nickname).await {
        warn!(error = %e, "Failed to send nickname");
    }

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

    info!("Host running");

    let mut closed_from_game = false;

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down");
                break;
            }
            event = events.recv() => {
                match event {
                    Some(RelayEvent::QuitRequested) => {
                        info!("Close requested by the sim");
                        closed_from_game = true;
                        break;
                    }
                    Some(RelayEvent::Closed) | None => {
                        info!("Sim exited");
                        closed_from_game = true;
                        break;
                    }
                }
            }
        }
    }

    // A close that came from the game means the sim is already on its way
    // out; don't signal it again.
    if closed_from_game {
        relay.shutdown_from_child().await;
    } else {
        relay.shutdown().await;
    }

    info!("Shutdown complete");
    Ok(())
}

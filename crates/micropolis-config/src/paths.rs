//! Default paths for the activity host
//!
//! Paths are user-writable by default (no root required):
//! - Profile: `$XDG_CONFIG_HOME/micropolis-activity/profile.toml` or
//!   `~/.config/micropolis-activity/profile.toml`
//! - Bundle: `$MICROPOLIS_BUNDLE_PATH` or the current directory

use std::path::PathBuf;

/// Environment variable for overriding the bundle directory
pub const BUNDLE_PATH_ENV: &str = "MICROPOLIS_BUNDLE_PATH";

/// Profile filename within the config directory
const PROFILE_FILENAME: &str = "profile.toml";

/// Application subdirectory name
const APP_DIR: &str = "micropolis-activity";

/// Get the default profile path.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/micropolis-activity/profile.toml` (if XDG_CONFIG_HOME is set)
/// 2. `~/.config/micropolis-activity/profile.toml` (fallback)
pub fn default_profile_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(PROFILE_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(PROFILE_FILENAME);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join(PROFILE_FILENAME)
}

/// Get the default bundle directory.
///
/// Order of precedence:
/// 1. `$MICROPOLIS_BUNDLE_PATH` environment variable (if set)
/// 2. The current working directory (the activity is normally started
///    from inside its own bundle)
pub fn default_bundle_dir() -> PathBuf {
    if let Ok(path) = std::env::var(BUNDLE_PATH_ENV) {
        return PathBuf::from(path);
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

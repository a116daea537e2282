//! Profile and path configuration for the Micropolis activity host
//!
//! The host needs very little from its environment: the user's nickname
//! (forwarded to the sim, possibly empty) and the bundle directory holding
//! the sim executable, its libraries, and its sound resources. Both come
//! from an optional TOML profile file with environment fallbacks.

mod paths;
mod profile;

pub use paths::*;
pub use profile::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read profile file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load a profile from a TOML file.
///
/// A missing file is not an error; the host runs fine on defaults.
pub fn load_profile(path: impl AsRef<Path>) -> ConfigResult<Profile> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Profile::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_profile(&content)
}

/// Parse a profile from a TOML string
pub fn parse_profile(content: &str) -> ConfigResult<Profile> {
    Ok(toml::from_str(content)?)
}

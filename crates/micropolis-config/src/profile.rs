//! User profile schema

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User profile for the activity host.
///
/// Everything is optional; [`Profile::resolve_nickname`] and the path
/// defaults in [`crate::paths`] fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Nickname forwarded to the sim via `SugarNickName`
    #[serde(default)]
    pub nickname: Option<String>,

    /// Bundle directory override
    #[serde(default)]
    pub bundle_dir: Option<PathBuf>,
}

impl Profile {
    /// Resolve the nickname to forward: profile value, else `$USER`,
    /// else empty. An empty nickname is valid on the wire.
    pub fn resolve_nickname(&self) -> String {
        if let Some(nick) = &self.nickname {
            return nick.clone();
        }
        std::env::var("USER").unwrap_or_default()
    }

    /// Resolve the bundle directory: profile value, else the defaults
    /// from [`crate::default_bundle_dir`].
    pub fn resolve_bundle_dir(&self) -> PathBuf {
        self.bundle_dir
            .clone()
            .unwrap_or_else(crate::default_bundle_dir)
    }
}

//! Bundle directory layout
//!
//! The bundle is the installation root containing the sim executable, its
//! per-architecture libraries, and its sound resources:
//!
//! ```text
//! <bundle>/res/sim.<arch>         sim executable
//! <bundle>/libs/<arch>/           library search path
//! <bundle>/res/sounds/<name>.wav  sound resources
//! ```

use std::path::{Path, PathBuf};

use crate::Arch;

/// Environment variable telling the sim where its home directory is
pub const HOME_DIR_ENV: &str = "SINHOME";

/// Library search path variable for the sim's bundled shared objects
pub const LIBRARY_PATH_ENV: &str = "LD_LIBRARY_PATH";

/// Fixed extension of bundled sound resources
const SOUND_EXTENSION: &str = "wav";

/// Resolved view of a bundle directory for one architecture
#[derive(Debug, Clone)]
pub struct BundleLayout {
    root: PathBuf,
    arch: Arch,
}

impl BundleLayout {
    pub fn new(root: impl Into<PathBuf>, arch: Arch) -> Self {
        Self {
            root: root.into(),
            arch,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Path of the architecture-specific sim executable
    pub fn sim_executable(&self) -> PathBuf {
        self.root.join("res").join(format!("sim.{}", self.arch.label()))
    }

    /// Library search path for the sim's bundled shared objects
    pub fn libs_dir(&self) -> PathBuf {
        self.root.join("libs").join(self.arch.label())
    }

    /// Directory holding the bundled sound resources
    pub fn sounds_dir(&self) -> PathBuf {
        self.root.join("res").join("sounds")
    }

    /// Resolve a sound name from a `PlaySound` command to a file path.
    /// Names are case-folded; the extension is fixed.
    pub fn sound_path(&self, name: &str) -> PathBuf {
        self.sounds_dir()
            .join(format!("{}.{}", name.to_lowercase(), SOUND_EXTENSION))
    }

    /// The explicit environment mapping passed to the sim at spawn time.
    /// Passed per spawn rather than mutating the host's own environment,
    /// so multiple relays could coexist.
    pub fn spawn_env(&self) -> Vec<(String, String)> {
        vec![
            (
                HOME_DIR_ENV.to_string(),
                self.root.to_string_lossy().into_owned(),
            ),
            (
                LIBRARY_PATH_ENV.to_string(),
                self.libs_dir().to_string_lossy().into_owned(),
            ),
        ]
    }
}

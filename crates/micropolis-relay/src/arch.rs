//! CPU architecture selection for the bundled sim binaries
//!
//! The bundle ships one sim binary per supported architecture
//! (`res/sim.x86-64`, `res/sim.x86`, `res/sim.arm`) plus a matching
//! `libs/<arch>` directory. The label is picked from the running machine's
//! instruction-set family and pointer width; anything else is a fatal
//! configuration error surfaced before any process is spawned.

use std::fmt;

use crate::{RelayError, RelayResult};

/// Architecture label for selecting the sim binary and library directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    X86,
    Arm,
}

impl Arch {
    /// The label used in bundle file names
    pub fn label(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86-64",
            Arch::X86 => "x86",
            Arch::Arm => "arm",
        }
    }

    /// Select the label for an instruction-set family and pointer width.
    ///
    /// An ARM family machine maps to `arm` regardless of pointer width.
    /// Every other family selects by width: 64-bit to `x86-64`, 32-bit to
    /// `x86`. Other widths are unsupported.
    pub fn from_machine(family: &str, pointer_width: u32) -> RelayResult<Self> {
        if family.starts_with("arm") || family == "aarch64" {
            return Ok(Arch::Arm);
        }

        match pointer_width {
            64 => Ok(Arch::X86_64),
            32 => Ok(Arch::X86),
            other => Err(RelayError::UnsupportedArch(format!(
                "{} ({}-bit)",
                family, other
            ))),
        }
    }

    /// Probe the running machine
    pub fn detect() -> RelayResult<Self> {
        let pointer_width: u32 = if cfg!(target_pointer_width = "64") {
            64
        } else {
            32
        };

        Self::from_machine(std::env::consts::ARCH, pointer_width)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_four_bit_non_arm_selects_x86_64() {
        assert_eq!(Arch::from_machine("x86_64", 64).unwrap(), Arch::X86_64);
        // Family is only inspected for ARM; width decides the rest.
        assert_eq!(Arch::from_machine("riscv64", 64).unwrap(), Arch::X86_64);
    }

    #[test]
    fn thirty_two_bit_non_arm_selects_x86() {
        assert_eq!(Arch::from_machine("x86", 32).unwrap(), Arch::X86);
    }

    #[test]
    fn arm_wins_regardless_of_pointer_width() {
        assert_eq!(Arch::from_machine("arm", 32).unwrap(), Arch::Arm);
        assert_eq!(Arch::from_machine("armv7", 32).unwrap(), Arch::Arm);
        assert_eq!(Arch::from_machine("aarch64", 64).unwrap(), Arch::Arm);
    }

    #[test]
    fn odd_pointer_widths_fail_fast() {
        assert!(matches!(
            Arch::from_machine("m68k", 16),
            Err(RelayError::UnsupportedArch(_))
        ));
    }

    #[test]
    fn labels_match_bundle_names() {
        assert_eq!(Arch::X86_64.label(), "x86-64");
        assert_eq!(Arch::X86.label(), "x86");
        assert_eq!(Arch::Arm.label(), "arm");
    }

    #[test]
    fn detect_succeeds_on_supported_hosts() {
        // Build targets for this crate are all within the supported set.
        assert!(Arch::detect().is_ok());
    }
}

//! NVIDIA architecture selectors and their normalized capability codes.
//!
//! Exactly one architecture is selected per build via an `arch-*` cargo
//! feature on `parax-cuda-setup`. The mapping in [`NvidiaArch::capability`]
//! is the single source of truth for capability gating across the workspace:
//! every selector maps to exactly one code, and an unrecognized selector is
//! a build error, never a silent default. Generating device code for the
//! wrong capability level is undefined behavior at the hardware level, not
//! merely slow.

use crate::error::{Result, SetupError};

/// Lowest device capability the framework supports (compute 3.0).
pub const MIN_DEVICE_CAPABILITY: u32 = 30;

/// Target NVIDIA GPU architecture, ordered by hardware family then minor
/// revision, oldest to newest.
///
/// Adding a new hardware generation is one new variant plus one new match
/// arm in [`NvidiaArch::capability`]; the match is exhaustive, so the
/// compiler enforces that the table stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NvidiaArch {
    Kepler30,
    Kepler32,
    Kepler35,
    Kepler37,
    Maxwell50,
    Maxwell52,
    Maxwell53,
    Pascal60,
    Pascal61,
    Volta70,
    Volta72,
    Turing75,
    Ampere80,
    Ampere86,
    Ada89,
    Hopper90,
}

impl NvidiaArch {
    /// Every recognized architecture, oldest to newest.
    pub const ALL: [NvidiaArch; 16] = [
        Self::Kepler30,
        Self::Kepler32,
        Self::Kepler35,
        Self::Kepler37,
        Self::Maxwell50,
        Self::Maxwell52,
        Self::Maxwell53,
        Self::Pascal60,
        Self::Pascal61,
        Self::Volta70,
        Self::Volta72,
        Self::Turing75,
        Self::Ampere80,
        Self::Ampere86,
        Self::Ada89,
        Self::Hopper90,
    ];

    /// Normalized capability code (`major * 10 + minor`).
    pub const fn capability(self) -> u32 {
        match self {
            Self::Kepler30 => 30,
            Self::Kepler32 => 32,
            Self::Kepler35 => 35,
            Self::Kepler37 => 37,
            Self::Maxwell50 => 50,
            Self::Maxwell52 => 52,
            Self::Maxwell53 => 53,
            Self::Pascal60 => 60,
            Self::Pascal61 => 61,
            Self::Volta70 => 70,
            Self::Volta72 => 72,
            Self::Turing75 => 75,
            Self::Ampere80 => 80,
            Self::Ampere86 => 86,
            Self::Ada89 => 89,
            Self::Hopper90 => 90,
        }
    }

    /// Value of the device-side architecture macro for this target
    /// (`major * 100 + minor * 10`, the `__CUDA_ARCH__` convention).
    pub const fn arch_macro_value(self) -> u32 {
        self.capability() * 10
    }

    /// Cargo feature name selecting this architecture on `parax-cuda-setup`.
    pub fn feature_name(self) -> String {
        format!("arch-{self}")
    }

    /// `sm_XX` target string handed to `nvcc -arch`.
    pub fn sm_target(self) -> String {
        format!("sm_{}", self.capability())
    }

    /// Parse a selector name (`kepler30` … `hopper90`), as derived from the
    /// `arch-*` feature set by the build script.
    pub fn from_selector(selector: &str) -> Result<Self> {
        let normalized = selector.trim().to_ascii_lowercase();
        for arch in Self::ALL {
            if normalized == arch.to_string() {
                return Ok(arch);
            }
        }
        Err(SetupError::UnrecognizedArchitecture { selector: selector.to_string() })
    }
}

impl std::fmt::Display for NvidiaArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Kepler30 => "kepler30",
            Self::Kepler32 => "kepler32",
            Self::Kepler35 => "kepler35",
            Self::Kepler37 => "kepler37",
            Self::Maxwell50 => "maxwell50",
            Self::Maxwell52 => "maxwell52",
            Self::Maxwell53 => "maxwell53",
            Self::Pascal60 => "pascal60",
            Self::Pascal61 => "pascal61",
            Self::Volta70 => "volta70",
            Self::Volta72 => "volta72",
            Self::Turing75 => "turing75",
            Self::Ampere80 => "ampere80",
            Self::Ampere86 => "ampere86",
            Self::Ada89 => "ada89",
            Self::Hopper90 => "hopper90",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for NvidiaArch {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_selector(s)
    }
}

/// Resolve the set of active selector names to exactly one architecture.
///
/// Zero recognized selectors or more than one selector is a hard error;
/// the framework never picks a default on the user's behalf.
pub fn select_architecture(selectors: &[String]) -> Result<NvidiaArch> {
    match selectors {
        [] => Err(SetupError::UnrecognizedArchitecture {
            selector: "(no arch-* feature enabled)".to_string(),
        }),
        [one] => NvidiaArch::from_selector(one),
        many => Err(SetupError::ConflictingArchitectures { selectors: many.to_vec() }),
    }
}

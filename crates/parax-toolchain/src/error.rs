//! Setup error types.
//!
//! Every error here is fatal to the build of the compilation unit that hit
//! it: the emitted symbol set must be complete and consistent before any
//! dependent code compiles, so nothing is caught or downgraded.

use thiserror::Error;

/// Errors produced while resolving the CUDA build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// GPU mode requested without a usable CUDA compiler front end, or the
    /// emitted symbols are inconsistent. The narrow missing-marker case is
    /// handled leniently in `validate` and never reaches this variant.
    #[error("CUDA toolchain mismatch: {reason}")]
    ToolchainMismatch { reason: String },

    /// Toolkit version below the supported floor (`CUDA_VERSION` encoding).
    #[error("CUDA toolkit version {found} is older than the supported minimum {minimum}")]
    ToolkitTooOld { found: u32, minimum: u32 },

    /// Per-unit device capability below the supported floor.
    #[error("device capability {found} is below the supported minimum {minimum} (compute 3.0)")]
    CapabilityTooOld { found: u32, minimum: u32 },

    /// Selector not in the enumerated architecture set.
    #[error("NVIDIA GPU architecture not recognized: {selector}")]
    UnrecognizedArchitecture { selector: String },

    /// More than one architecture selector active in the same unit.
    #[error("conflicting NVIDIA GPU architecture selectors: {}", selectors.join(", "))]
    ConflictingArchitectures { selectors: Vec<String> },
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, SetupError>;

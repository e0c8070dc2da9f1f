//! The immutable per-unit CUDA configuration.
//!
//! `build.rs` emits the resolved symbols as `rustc-env` values; this module
//! turns them back into one [`CudaSetup`] value. The framework computes it
//! once per unit and threads it explicitly to whatever needs it; nothing
//! here is ambient mutable state.

use parax_toolchain::{NvidiaArch, Result, SetupError};

use crate::placement::LambdaCapture;

/// Check if GPU support was compiled into this unit.
///
/// Compile-time constant; does not probe hardware.
#[inline]
pub const fn cuda_compiled() -> bool {
    cfg!(feature = "cuda")
}

/// Snapshot of the build-time CUDA resolution for this compilation unit.
///
/// Created once by [`CudaSetup::resolve`] and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CudaSetup {
    pub arch: NvidiaArch,
    /// Normalized capability code, e.g. 70 for Volta.
    pub capability: u32,
    /// Toolkit version in `CUDA_VERSION` encoding, e.g. 12030.
    pub toolkit_version: u32,
    /// Dual-context capture mode, present only under `cuda-lambda`.
    pub lambda_capture: Option<LambdaCapture>,
    /// Targeting GPU compilation on a Windows-class host.
    pub windows_host: bool,
}

#[cfg(feature = "cuda")]
impl CudaSetup {
    /// Resolve the configuration from the symbols the build script emitted.
    ///
    /// The symbols are written by this crate's own build script, so a parse
    /// failure means the toolchain integration is broken, not that a
    /// feature is missing.
    pub fn resolve() -> Result<Self> {
        let capability = parse_symbol("PARAX_CUDA_ARCH", env!("PARAX_CUDA_ARCH"))?;
        let arch = NvidiaArch::from_selector(env!("PARAX_CUDA_ARCH_NAME"))?;
        let toolkit_version = parse_symbol("PARAX_CUDA_VERSION", env!("PARAX_CUDA_VERSION"))?;

        let setup = Self {
            arch,
            capability,
            toolkit_version,
            lambda_capture: LambdaCapture::active(),
            windows_host: cfg!(parax_windows_cuda),
        };
        tracing::debug!(
            arch = %setup.arch,
            capability = setup.capability,
            toolkit_version = setup.toolkit_version,
            windows_host = setup.windows_host,
            "resolved CUDA build configuration"
        );
        Ok(setup)
    }
}

#[cfg(not(feature = "cuda"))]
impl CudaSetup {
    /// Host-only build: there is no CUDA configuration to resolve.
    pub fn resolve() -> Result<Self> {
        Err(SetupError::ToolchainMismatch {
            reason: "this unit was built without the `cuda` feature".to_string(),
        })
    }
}

#[cfg(feature = "cuda")]
fn parse_symbol(name: &str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| SetupError::ToolchainMismatch {
        reason: format!("build symbol {name} is not an integer: {value}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuda_compiled_reflects_the_feature_flag() {
        assert_eq!(cuda_compiled(), cfg!(feature = "cuda"));
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn resolve_refuses_host_only_builds() {
        let err = CudaSetup::resolve().unwrap_err();
        assert!(matches!(err, SetupError::ToolchainMismatch { .. }));
    }

    #[cfg(feature = "cuda")]
    #[test]
    fn resolve_matches_the_emitted_symbols() {
        let setup = CudaSetup::resolve().unwrap();
        assert_eq!(setup.capability, setup.arch.capability());
        assert_eq!(setup.lambda_capture.is_some(), cfg!(feature = "cuda-lambda"));
    }

    #[cfg(feature = "cuda")]
    #[test]
    fn resolve_is_deterministic() {
        assert_eq!(CudaSetup::resolve().unwrap(), CudaSetup::resolve().unwrap());
    }
}

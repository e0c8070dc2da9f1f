//! The once-per-unit resolution pipeline.
//!
//! Linear, evaluated once per compilation unit: toolchain validation first
//! (hard prerequisite), then the version gate, then capability extraction.
//! The attribute tag table in `parax-cuda-setup` consumes the outcome.

use crate::arch::{self, NvidiaArch};
use crate::error::Result;
use crate::validate::{gate_device_capability, validate_toolchain, ToolchainFact};
use crate::version::CudaVersion;

/// Inputs to the resolution pipeline, gathered by the build script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub fact: ToolchainFact,
    /// Active `arch-*` selector names, as found in the feature set.
    pub selectors: Vec<String>,
    /// Targeting a Windows-class host.
    pub windows_host: bool,
}

/// The resolved, immutable CUDA configuration for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCuda {
    pub arch: NvidiaArch,
    /// Normalized capability code, e.g. 70 for Volta.
    pub capability: u32,
    pub toolkit: CudaVersion,
    /// The `PARAX_CUDACC` marker had to be synthesized.
    pub shimmed_marker: bool,
    pub windows_host: bool,
    /// Inconsistencies to surface as build warnings.
    pub warnings: Vec<String>,
}

/// Run the full pipeline. Any `Err` aborts the build of this unit.
pub fn resolve(request: &BuildRequest) -> Result<ResolvedCuda> {
    let report = validate_toolchain(&request.fact)?;
    let arch = arch::select_architecture(&request.selectors)?;
    gate_device_capability(arch.capability())?;

    Ok(ResolvedCuda {
        arch,
        capability: arch.capability(),
        toolkit: report.toolkit,
        shimmed_marker: report.shimmed_marker,
        windows_host: request.windows_host,
        warnings: report.warnings,
    })
}

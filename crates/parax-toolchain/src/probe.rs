//! Build-environment probing: compiler location and configuration knobs.
//!
//! Resolution must be purely a function of the build environment so that a
//! build system compiling many units in parallel re-derives identical
//! constants; nothing here mutates state.
//!
//! Knobs:
//! - `PARAX_NVCC`: explicit path to the CUDA compiler driver.
//! - `PARAX_NVCC_VERSION`: version override in `CUDA_VERSION` encoding, for
//!   toolchains that wrap `nvcc`. Ignored under strict mode.
//! - `PARAX_STRICT_MODE=1`: only trust the real toolchain.
//! - `PARAX_CUDACC`: marker set by the outer build orchestration.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::validate::{MarkerState, ToolchainFact};

/// Check whether strict mode is enabled (`PARAX_STRICT_MODE=1|true`).
pub fn strict_mode_enabled() -> bool {
    std::env::var("PARAX_STRICT_MODE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Read the `PARAX_NVCC_VERSION` override, honoring strict mode.
pub fn version_override() -> Option<u32> {
    if strict_mode_enabled() {
        return None;
    }
    std::env::var("PARAX_NVCC_VERSION").ok()?.trim().parse().ok()
}

/// Locate the CUDA compiler driver.
///
/// Search order: `PARAX_NVCC`, `$PATH`, `$CUDA_PATH/bin`, then common
/// install prefixes.
pub fn find_nvcc() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("PARAX_NVCC") {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return Some(path);
        }
    }

    if let Some(path) = which_in_path("nvcc") {
        return Some(path);
    }

    if let Ok(cuda_path) = std::env::var("CUDA_PATH") {
        let candidate = Path::new(&cuda_path).join("bin").join("nvcc");
        if candidate.exists() {
            return Some(candidate);
        }
    }

    let common_paths = [
        "/usr/local/cuda/bin/nvcc",
        "/usr/local/cuda-13.0/bin/nvcc",
        "/usr/local/cuda-12.0/bin/nvcc",
        "/usr/local/cuda-11.0/bin/nvcc",
        "/opt/cuda/bin/nvcc",
    ];
    common_paths.iter().map(PathBuf::from).find(|p| p.exists())
}

fn which_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        let candidate_exe = dir.join(format!("{name}.exe"));
        if candidate_exe.is_file() {
            return Some(candidate_exe);
        }
    }
    None
}

/// Run `nvcc --version` and capture its banner.
pub fn query_version_banner(nvcc: &Path) -> Option<String> {
    let output = Command::new(nvcc)
        .arg("--version")
        .stderr(std::process::Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Gather the per-unit [`ToolchainFact`] from the build environment.
///
/// A version override counts as a located toolchain: it exists for wrappers
/// that hide the real `nvcc` from `$PATH`.
pub fn gather_toolchain_fact() -> ToolchainFact {
    let version_override = version_override();
    let version_banner = find_nvcc().and_then(|nvcc| query_version_banner(&nvcc));
    let marker = if std::env::var_os("PARAX_CUDACC").is_some() {
        MarkerState::Present
    } else {
        MarkerState::Absent
    };

    ToolchainFact {
        compiler_found: version_banner.is_some() || version_override.is_some(),
        version_banner,
        version_override,
        marker,
    }
}

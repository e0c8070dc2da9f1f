//! Once-per-unit CUDA build resolution.
//!
//! Runs only under the `cuda` feature: confirms a CUDA compiler front end is
//! driving the build, gates its version, resolves the selected architecture
//! to a normalized capability code, and emits the symbols the library
//! re-exports. Any failure aborts the build with a diagnostic; compiling
//! framework code against an unresolved configuration would miscompile
//! device code.

use std::env;
use std::fs;
use std::path::PathBuf;

use parax_toolchain::{probe, resolve, BuildRequest, ResolvedCuda};

fn main() {
    println!("cargo:rustc-check-cfg=cfg(parax_windows_cuda)");
    println!("cargo:rerun-if-changed=build.rs");
    for key in ["PARAX_NVCC", "PARAX_NVCC_VERSION", "PARAX_STRICT_MODE", "PARAX_CUDACC"] {
        println!("cargo:rerun-if-env-changed={key}");
    }

    // Host-only build: the validator must not run at all.
    if env::var_os("CARGO_FEATURE_CUDA").is_none() {
        return;
    }

    let request = BuildRequest {
        fact: probe::gather_toolchain_fact(),
        selectors: active_arch_selectors(),
        windows_host: env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows"),
    };

    match resolve(&request) {
        Ok(resolved) => emit(&resolved),
        Err(err) => {
            panic!("\nparax-cuda-setup: CUDA build configuration failed\n  {err}\n");
        }
    }
}

/// Active `arch-*` selector names, lowercased, in a stable order.
///
/// Scanned from the feature environment rather than hard-coded so a feature
/// added to Cargo.toml without a matching enum variant surfaces as an
/// unrecognized-architecture diagnostic instead of being ignored.
fn active_arch_selectors() -> Vec<String> {
    const PREFIX: &str = "CARGO_FEATURE_ARCH_";
    let mut names: Vec<String> = env::vars()
        .filter(|(key, _)| key.starts_with(PREFIX))
        .map(|(key, _)| key[PREFIX.len()..].to_ascii_lowercase())
        .collect();
    names.sort();
    names
}

fn emit(resolved: &ResolvedCuda) {
    for warning in &resolved.warnings {
        println!("cargo:warning=parax-cuda-setup: {warning}");
    }

    // Confirm or synthesize the marker; emitted once either way.
    println!("cargo:rustc-env=PARAX_CUDACC=1");
    println!("cargo:rustc-env=PARAX_CUDA_ARCH={}", resolved.capability);
    println!("cargo:rustc-env=PARAX_CUDA_ARCH_NAME={}", resolved.arch);
    println!("cargo:rustc-env=PARAX_CUDA_VERSION={}", resolved.toolkit.encode());

    if resolved.windows_host {
        println!("cargo:rustc-cfg=parax_windows_cuda");
    }

    write_arch_constants(resolved);
}

/// Generate the integer constants downstream code gates on in const position.
fn write_arch_constants(resolved: &ResolvedCuda) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set by cargo"));
    let contents = format!(
        "/// Normalized capability code for this unit ({}).\n\
         pub const CUDA_ARCH: u32 = {};\n\
         /// Toolkit version in `CUDA_VERSION` encoding.\n\
         pub const CUDA_TOOLKIT_VERSION: u32 = {};\n",
        resolved.arch,
        resolved.capability,
        resolved.toolkit.encode(),
    );
    let path = out_dir.join("cuda_arch.rs");
    fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}

//! Build-time CUDA toolchain validation for the Parax execution framework.
//!
//! Everything in this crate is pure logic over facts gathered from the build
//! environment; no `cargo:` directives are printed here. The build script of
//! `parax-cuda-setup` feeds a [`ToolchainFact`] and the active architecture
//! selectors into [`resolve`] and turns the outcome into build symbols or a
//! build abort.

pub mod arch;
pub mod error;
pub mod probe;
pub mod resolve;
pub mod validate;
pub mod version;

pub use arch::{select_architecture, NvidiaArch, MIN_DEVICE_CAPABILITY};
pub use error::{Result, SetupError};
pub use resolve::{resolve, BuildRequest, ResolvedCuda};
pub use validate::{
    gate_device_capability, validate_toolchain, MarkerState, ToolchainFact, ToolchainReport,
};
pub use version::{CudaVersion, MIN_CUDA_VERSION};

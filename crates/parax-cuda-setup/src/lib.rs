//! CUDA build resolution and function-placement tags for the Parax
//! execution framework.
//!
//! Before any framework code compiles, this crate's build script answers
//! three questions: is the toolchain actually a CUDA front end, is it new
//! enough, and which capability level did the user select. The library then
//! exposes the answers: [`CudaSetup`] (the resolved configuration for this
//! unit), the placement tag table in [`placement`], and the lambda-capture
//! mode.
//!
//! Select an architecture with exactly one `arch-*` feature:
//!
//! ```toml
//! parax-cuda-setup = { version = "0.4", features = ["cuda", "arch-volta70"] }
//! ```

pub mod config;
pub mod placement;

pub use config::{cuda_compiled, CudaSetup};
pub use parax_toolchain::{
    CudaVersion, NvidiaArch, Result, SetupError, MIN_CUDA_VERSION, MIN_DEVICE_CAPABILITY,
};
#[cfg(feature = "cuda-lambda")]
pub use placement::{CLASS_LAMBDA_CAPTURE, LAMBDA_CAPTURE};
pub use placement::{FunctionSpace, InlineLevel, LambdaCapture, Placement, FORCEINLINE};

// Integer constants generated by the build script (`CUDA_ARCH`,
// `CUDA_TOOLKIT_VERSION`), usable in const position for feature gating.
#[cfg(feature = "cuda")]
include!(concat!(env!("OUT_DIR"), "/cuda_arch.rs"));

//! Function-placement tags and lambda-capture spellings.
//!
//! The kernel code generator emits CUDA C++ source; every compiler-specific
//! qualifier spelling lives in this one module so the rest of the framework
//! speaks only in the symbolic names. The tags are fixed for the lifetime
//! of a build and never recomputed.

/// How aggressively a dual function is inlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineLevel {
    /// No inlining directive.
    None,
    /// Ordinary `inline` hint.
    Hint,
    /// `__forceinline__`.
    Force,
}

/// Where a function's generated code may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Host-only function.
    Host,
    /// Device-only function.
    Device,
    /// Dual host/device function.
    Dual,
    /// Dual function, force-inlined.
    DualForceInline,
    /// Dual function with an ordinary inline hint.
    DualInline,
}

/// Capability description for a placement tag, so downstream code can reason
/// about callability without pattern-matching on qualifier strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpace {
    pub host_callable: bool,
    pub device_callable: bool,
    pub inline: InlineLevel,
}

impl Placement {
    /// Every placement tag.
    pub const ALL: [Placement; 5] =
        [Self::Host, Self::Device, Self::Dual, Self::DualForceInline, Self::DualInline];

    /// Concrete qualifier spelling for emitted CUDA source.
    pub const fn qualifiers(self) -> &'static str {
        match self {
            Self::Host => "__host__",
            Self::Device => "__device__",
            Self::Dual => "__device__ __host__",
            Self::DualForceInline => "__device__ __host__ __forceinline__",
            Self::DualInline => "__device__ __host__ inline",
        }
    }

    /// Callability and inlining description of this tag.
    pub const fn space(self) -> FunctionSpace {
        match self {
            Self::Host => FunctionSpace {
                host_callable: true,
                device_callable: false,
                inline: InlineLevel::None,
            },
            Self::Device => FunctionSpace {
                host_callable: false,
                device_callable: true,
                inline: InlineLevel::None,
            },
            Self::Dual => FunctionSpace {
                host_callable: true,
                device_callable: true,
                inline: InlineLevel::None,
            },
            Self::DualForceInline => FunctionSpace {
                host_callable: true,
                device_callable: true,
                inline: InlineLevel::Force,
            },
            Self::DualInline => FunctionSpace {
                host_callable: true,
                device_callable: true,
                inline: InlineLevel::Hint,
            },
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Host => "host",
            Self::Device => "device",
            Self::Dual => "dual",
            Self::DualForceInline => "dual-forceinline",
            Self::DualInline => "dual-inline",
        };
        write!(f, "{name}")
    }
}

/// Plain force-inline spelling, for uses outside the placement table.
pub const FORCEINLINE: &str = "__forceinline__";

/// Closure-capture syntax variant for generated dual-context lambdas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LambdaCapture {
    /// Ordinary by-value capture.
    Plain,
    /// By-value capture that also copies the enclosing object (`*this`),
    /// for closures defined inside member functions.
    ObjectCapturing,
}

impl LambdaCapture {
    /// Capture-and-qualifier prefix for an emitted lambda.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Plain => "[=] __host__ __device__",
            Self::ObjectCapturing => "[ =, *this ] __host__ __device__",
        }
    }

    /// Mode enabled by the `cuda-lambda` feature for this build. Without
    /// the feature only plain by-value capture is generated, and the
    /// object-capturing spelling is not defined at all.
    pub const fn active() -> Option<Self> {
        if cfg!(feature = "cuda-lambda") {
            Some(Self::ObjectCapturing)
        } else {
            None
        }
    }
}

/// By-value dual-context capture prefix for generated lambdas.
#[cfg(feature = "cuda-lambda")]
pub const LAMBDA_CAPTURE: &str = LambdaCapture::Plain.prefix();

/// Object-capturing variant, for lambdas defined inside member functions
/// that must copy the enclosing object onto the device.
#[cfg(feature = "cuda-lambda")]
pub const CLASS_LAMBDA_CAPTURE: &str = LambdaCapture::ObjectCapturing.prefix();

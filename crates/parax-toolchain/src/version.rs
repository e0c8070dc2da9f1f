//! CUDA toolkit version encoding and parsing.
//!
//! The toolkit reports its version through the monotonic integer convention
//! `major * 1000 + minor * 10` (`CUDA_VERSION`), so a single comparison
//! gates feature availability downstream.

use crate::error::{Result, SetupError};

/// Minimum supported toolkit version (CUDA 11.0) in `CUDA_VERSION` encoding.
pub const MIN_CUDA_VERSION: u32 = 11_000;

/// Toolkit version in major/minor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CudaVersion {
    pub major: u32,
    pub minor: u32,
}

impl CudaVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Monotonic integer encoding (`major * 1000 + minor * 10`).
    pub const fn encode(self) -> u32 {
        self.major * 1000 + self.minor * 10
    }

    /// Inverse of [`CudaVersion::encode`].
    pub const fn decode(raw: u32) -> Self {
        Self { major: raw / 1000, minor: (raw % 1000) / 10 }
    }

    /// Parse the banner `nvcc --version` prints, e.g.
    /// `Cuda compilation tools, release 12.3, V12.3.107`.
    ///
    /// A banner with no parsable `release M.N` token signals a broken
    /// toolchain integration and fails hard.
    pub fn parse_nvcc_banner(banner: &str) -> Result<Self> {
        let mismatch = || SetupError::ToolchainMismatch {
            reason: format!(
                "compiler did not report a parsable version (`release M.N` not found in: {})",
                banner.lines().last().unwrap_or_default().trim()
            ),
        };

        let rest = banner.split("release ").nth(1).ok_or_else(mismatch)?;
        let token: String =
            rest.chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
        let (major, minor) = token.split_once('.').ok_or_else(mismatch)?;

        Ok(Self {
            major: major.parse().map_err(|_| mismatch())?,
            minor: minor.parse().map_err(|_| mismatch())?,
        })
    }
}

impl std::fmt::Display for CudaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: &str = "nvcc: NVIDIA (R) Cuda compiler driver\n\
                          Copyright (c) 2005-2023 NVIDIA Corporation\n\
                          Built on Fri_Sep__8_19:17:24_PDT_2023\n\
                          Cuda compilation tools, release 12.3, V12.3.103\n\
                          Build cuda_12.3.r12.3/compiler.33492891_0\n";

    #[test]
    fn encode_follows_convention() {
        assert_eq!(CudaVersion::new(11, 0).encode(), 11_000);
        assert_eq!(CudaVersion::new(12, 3).encode(), 12_030);
    }

    #[test]
    fn decode_inverts_encode() {
        let v = CudaVersion::new(12, 3);
        assert_eq!(CudaVersion::decode(v.encode()), v);
    }

    #[test]
    fn parses_real_banner() {
        let v = CudaVersion::parse_nvcc_banner(BANNER).unwrap();
        assert_eq!(v, CudaVersion::new(12, 3));
    }

    #[test]
    fn parses_minimal_banner() {
        let v = CudaVersion::parse_nvcc_banner("release 11.4, V11.4.152").unwrap();
        assert_eq!(v, CudaVersion::new(11, 4));
    }

    #[test]
    fn rejects_banner_without_release_token() {
        let err = CudaVersion::parse_nvcc_banner("gcc (GCC) 13.2.0").unwrap_err();
        assert!(matches!(err, SetupError::ToolchainMismatch { .. }));
    }

    #[test]
    fn rejects_garbled_release_token() {
        assert!(CudaVersion::parse_nvcc_banner("release next").is_err());
    }

    #[test]
    fn display_is_dotted() {
        assert_eq!(CudaVersion::new(12, 0).to_string(), "12.0");
    }
}

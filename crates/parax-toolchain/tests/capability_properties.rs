//! Property tests for capability extraction and version gating.
//!
//! These verify the invariants the rest of the framework relies on: the
//! selector-to-code mapping is total and injective, gating is a pure
//! function of its inputs, and the version encoding is order-preserving.

use parax_toolchain::{
    gate_device_capability, resolve, select_architecture, BuildRequest, CudaVersion, MarkerState,
    NvidiaArch, SetupError, ToolchainFact, MIN_CUDA_VERSION, MIN_DEVICE_CAPABILITY,
};
use proptest::prelude::*;

fn arbitrary_arch() -> impl Strategy<Value = NvidiaArch> {
    prop::sample::select(NvidiaArch::ALL.to_vec())
}

proptest! {
    // Distinct selectors yield distinct capability codes.
    #[test]
    fn extraction_is_injective(a in arbitrary_arch(), b in arbitrary_arch()) {
        if a != b {
            prop_assert_ne!(a.capability(), b.capability());
        } else {
            prop_assert_eq!(a.capability(), b.capability());
        }
    }

    // Every enumerated selector resolves, and its code passes the gate.
    #[test]
    fn extraction_is_total(arch in arbitrary_arch()) {
        let selected = select_architecture(&[arch.to_string()]).unwrap();
        prop_assert_eq!(selected, arch);
        prop_assert!(gate_device_capability(arch.capability()).is_ok());
    }

    // The capability gate is a pure threshold at the floor.
    #[test]
    fn capability_gate_is_a_threshold(capability in 0u32..200) {
        let outcome = gate_device_capability(capability);
        prop_assert_eq!(outcome.is_ok(), capability >= MIN_DEVICE_CAPABILITY);
    }

    // The CUDA_VERSION encoding preserves (major, minor) ordering.
    #[test]
    fn version_encoding_is_order_preserving(
        major_a in 0u32..100, minor_a in 0u32..10,
        major_b in 0u32..100, minor_b in 0u32..10,
    ) {
        let a = CudaVersion::new(major_a, minor_a);
        let b = CudaVersion::new(major_b, minor_b);
        prop_assert_eq!(a.cmp(&b), a.encode().cmp(&b.encode()));
        prop_assert_eq!(CudaVersion::decode(a.encode()), a);
    }

    // Resolution is deterministic: identical requests give identical results.
    #[test]
    fn resolution_is_deterministic(arch in arbitrary_arch(), shim in any::<bool>()) {
        let request = BuildRequest {
            fact: ToolchainFact {
                compiler_found: true,
                version_banner: Some("release 12.3, V12.3.103".to_string()),
                version_override: None,
                marker: if shim { MarkerState::Absent } else { MarkerState::Present },
            },
            selectors: vec![arch.to_string()],
            windows_host: false,
        };
        prop_assert_eq!(resolve(&request), resolve(&request));
    }
}

#[test]
fn scenario_volta_and_hopper_codes() {
    assert_eq!(NvidiaArch::Volta70.capability(), 70);
    assert_eq!(NvidiaArch::Hopper90.capability(), 90);
}

#[test]
fn scenario_unrecognized_selector_names_it() {
    let err = select_architecture(&["blackwell99".to_string()]).unwrap_err();
    match err {
        SetupError::UnrecognizedArchitecture { selector } => {
            assert_eq!(selector, "blackwell99");
        }
        other => panic!("expected UnrecognizedArchitecture, got: {other}"),
    }
}

#[test]
fn toolkit_floor_is_cuda_11() {
    assert_eq!(MIN_CUDA_VERSION, CudaVersion::new(11, 0).encode());
}

//! # ecsign
//!
//! A software-only ECDSA engine over short-Weierstrass prime-field curves.
//!
//! ## Usage
//!
//! ```
//! use ecsign::prelude::*;
//! use rand::rngs::OsRng;
//!
//! let curve = CurveParams::named(NamedCurve::Secp192k1).unwrap();
//! let keys = generate_keypair(&curve, &mut OsRng).unwrap();
//! let digest = HashAlgorithm::Sha256.digest(b"message");
//! let sig = sign(&curve, keys.signing_key(), &digest, &mut OsRng).unwrap();
//! assert!(verify(&curve, keys.verifying_key(), &digest, &sig).unwrap());
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `serde`: serialization for signatures and signing policy
//! - `trace`: trace-level logging of signing and verification
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`ecsign-api`]: error type and the `SignatureScheme` trait
//! - [`ecsign-common`]: constant-time helpers and zeroizing buffers
//! - [`ecsign-params`]: built-in curve constants
//! - [`ecsign-algorithms`]: field, scalar and point arithmetic
//! - [`ecsign-sign`]: ECDSA keys, signing and verification

#![forbid(unsafe_code)]

pub use ecsign_algorithms as algorithms;
pub use ecsign_api as api;
pub use ecsign_common as common;
pub use ecsign_params as params;
pub use ecsign_sign as sign;

/// Common imports for ecsign users
pub mod prelude {
    pub use crate::api::{Error, Result, SignatureScheme};

    pub use crate::algorithms::{
        AffinePoint, CurveDefinition, CurveParams, NamedCurve, PointFormat,
    };

    pub use crate::sign::{
        derive_public_key, generate_keypair, sign, sign_raw, sign_with_config,
        validate_public_key, verify, verify_with_config, DigestReduction, Ecdsa, EcdsaConfig,
        HashAlgorithm, KeyPair, NonceMode, Signature, SigningKey, VerifyingKey,
    };
}

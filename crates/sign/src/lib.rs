//! ECDSA signatures for the ecsign library
//!
//! Key generation, signing and verification on top of the curve arithmetic
//! in `ecsign-algorithms`. Everything lives in [`ecdsa`]; the most common
//! items are re-exported here.

#![forbid(unsafe_code)]

pub mod ecdsa;

pub use ecdsa::{
    derive_public_key, generate_keypair, sign, sign_raw, sign_with_config, validate_public_key,
    verify, verify_with_config, DigestReduction, Ecdsa, EcdsaConfig, HashAlgorithm, KeyPair,
    NonceMode, Signature, SigningKey, VerifyingKey,
};

//! Security primitives and memory safety utilities
//!
//! Zeroizing containers used for private scalars, nonce material and
//! HMAC-DRBG state.

pub mod secret;

pub use secret::{SecretBuffer, SecretVec, ZeroizeGuard};

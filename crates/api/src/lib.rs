//! Public API traits and types for the ecsign library
//!
//! This crate provides the public API surface for the ecsign workspace: the
//! error taxonomy shared by every crate and the [`SignatureScheme`] trait
//! implemented by the ECDSA engine.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{validate, Error, Result};
pub use traits::signature::SignatureScheme;

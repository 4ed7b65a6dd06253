//! Trait definitions for signature schemes

pub mod signature;

pub use signature::SignatureScheme;

//! Common implementations and shared functionality for the ecsign library
//!
//! This crate provides constant-time helpers and zeroizing containers used
//! across the ecsign components.

#![forbid(unsafe_code)]

pub mod constant_time;
pub mod security;

// Re-export core security types
pub use security::{SecretBuffer, SecretVec, ZeroizeGuard};

pub use constant_time::{ct_eq, ct_is_zero};

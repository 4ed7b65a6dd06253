//! Constant values for ecsign cryptographic operations
//!
//! This crate holds the curve domain parameters and hash sizes used across
//! the ecsign workspace.

#![no_std]

pub mod traditional;
pub mod utils;

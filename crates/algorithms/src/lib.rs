//! Constant-time arithmetic for elliptic-curve signatures
//!
//! This crate provides the arithmetic layer of the ecsign library: prime
//! fields with Montgomery multiplication, scalars modulo the group order,
//! and short-Weierstrass point arithmetic with SEC1 encodings. Curves are
//! runtime values, so custom domain parameters go through the same code and
//! the same validation as the built-in ones.
//!
//! Secret-dependent work (field and scalar arithmetic, scalar
//! multiplication) uses fixed limb loops and `subtle` selects. Only public
//! exponents (inversion, square roots) and public encodings are branched on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub use error::{validate, Error, Result};

pub mod ec;
pub use ec::{
    AffinePoint, CurveDefinition, CurveParams, FieldElement, NamedCurve, NonZeroScalar,
    PointFormat, PrimeField, Scalar, ScalarField,
};

//! Elliptic curve primitives over short-Weierstrass prime-field curves
//!
//! One generic engine serves every curve: the modulus, coefficients and base
//! point live in a [`CurveParams`] value chosen at runtime, and all field,
//! scalar and point operations are methods on that value (or on the
//! [`PrimeField`] / [`ScalarField`] it owns). Built-in curves are listed in
//! [`NamedCurve`].

mod curve;
mod encoding;
mod field;
pub(crate) mod limbs;
mod monty;
mod point;
mod scalar;

pub use curve::{CurveDefinition, CurveParams, NamedCurve};
pub use field::{FieldElement, PrimeField};
pub use point::{AffinePoint, PointFormat};
pub use scalar::{NonZeroScalar, Scalar, ScalarField, MAX_SAMPLING_ATTEMPTS};

#[cfg(test)]
mod tests;

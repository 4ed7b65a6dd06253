//! Curve domain parameters and the built-in named curves

use core::fmt;
use core::str::FromStr;

use ecsign_params::traditional::ecdsa::{
    CurveConstants, NIST_P192, NIST_P256, SECP192K1, SECP256K1,
};

use super::field::{FieldElement, PrimeField};
use super::point::AffinePoint;
use super::scalar::{Scalar, ScalarField};
use crate::error::{validate, Error, Result};

/// Raw domain parameters of a short-Weierstrass curve y² = x³ + ax + b
///
/// All integers are big-endian byte strings. Nothing is checked until the
/// definition is turned into [`CurveParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveDefinition<'a> {
    /// Human-readable name, used in logs and `Display`
    pub name: &'a str,
    /// Field prime p
    pub p: &'a [u8],
    /// Coefficient a
    pub a: &'a [u8],
    /// Coefficient b
    pub b: &'a [u8],
    /// Base point x-coordinate
    pub g_x: &'a [u8],
    /// Base point y-coordinate
    pub g_y: &'a [u8],
    /// Order of the base point
    pub n: &'a [u8],
    /// Cofactor
    pub h: u32,
}

impl<'a, const N: usize> From<&'a CurveConstants<N>> for CurveDefinition<'a> {
    fn from(c: &'a CurveConstants<N>) -> Self {
        CurveDefinition {
            name: c.name,
            p: &c.p,
            a: &c.a,
            b: &c.b,
            g_x: &c.g_x,
            g_y: &c.g_y,
            n: &c.n,
            h: c.h,
        }
    }
}

/// Curves shipped with the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamedCurve {
    /// SEC 2 secp192k1
    Secp192k1,
    /// NIST P-192 (secp192r1)
    Secp192r1,
    /// SEC 2 secp256k1
    Secp256k1,
    /// NIST P-256 (secp256r1)
    #[default]
    Secp256r1,
}

impl NamedCurve {
    /// Every built-in curve
    pub const ALL: [NamedCurve; 4] = [
        NamedCurve::Secp192k1,
        NamedCurve::Secp192r1,
        NamedCurve::Secp256k1,
        NamedCurve::Secp256r1,
    ];

    /// SEC 2 name
    pub fn name(self) -> &'static str {
        match self {
            NamedCurve::Secp192k1 => SECP192K1.name,
            NamedCurve::Secp192r1 => NIST_P192.name,
            NamedCurve::Secp256k1 => SECP256K1.name,
            NamedCurve::Secp256r1 => NIST_P256.name,
        }
    }

    /// Domain parameters as a [`CurveDefinition`]
    pub fn definition(self) -> CurveDefinition<'static> {
        match self {
            NamedCurve::Secp192k1 => CurveDefinition::from(&SECP192K1),
            NamedCurve::Secp192r1 => CurveDefinition::from(&NIST_P192),
            NamedCurve::Secp256k1 => CurveDefinition::from(&SECP256K1),
            NamedCurve::Secp256r1 => CurveDefinition::from(&NIST_P256),
        }
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedCurve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "secp192k1" => Ok(NamedCurve::Secp192k1),
            "secp192r1" | "p-192" | "p192" | "prime192v1" => Ok(NamedCurve::Secp192r1),
            "secp256k1" => Ok(NamedCurve::Secp256k1),
            "secp256r1" | "p-256" | "p256" | "prime256v1" => Ok(NamedCurve::Secp256r1),
            _ => Err(Error::param("curve", format!("unknown curve '{}'", s))),
        }
    }
}

/// Validated curve parameters
///
/// Immutable after construction and safe to share between threads.
#[derive(Clone, Debug)]
pub struct CurveParams {
    name: String,
    field: PrimeField,
    scalars: ScalarField,
    a: FieldElement,
    b: FieldElement,
    generator: AffinePoint,
    cofactor: u32,
}

impl CurveParams {
    /// Validate a definition and precompute its field contexts
    ///
    /// Checks that p and n are odd probable primes, that a, b and G lie in
    /// 𝔽ₚ, that the curve is non-singular, and that G is a point of order n.
    pub fn new(def: &CurveDefinition<'_>) -> Result<Self> {
        let result = Self::build(def);
        match &result {
            Ok(curve) => log::debug!(
                "curve {} validated: {}-bit field, {}-bit order, cofactor {}",
                curve.name,
                curve.field.bits(),
                curve.scalars.bits(),
                curve.cofactor
            ),
            Err(e) => log::debug!("curve {} rejected: {}", def.name, e),
        }
        result
    }

    fn build(def: &CurveDefinition<'_>) -> Result<Self> {
        let field = PrimeField::new(def.p)?;
        let scalars = ScalarField::new(def.n)?;
        validate::parameter(def.h >= 1, "h", "cofactor must be positive")?;

        let in_field = |bytes: &[u8], name: &'static str| {
            field
                .from_bytes(bytes)
                .map_err(|_| Error::param(name, "value must be less than p"))
        };
        let a = in_field(def.a, "a")?;
        let b = in_field(def.b, "b")?;
        let g_x = in_field(def.g_x, "g_x")?;
        let g_y = in_field(def.g_y, "g_y")?;

        // 4a³ + 27b² ≠ 0
        let a3 = field.mul(&field.square(&a), &a);
        let b2 = field.square(&b);
        let disc = field.add(
            &field.mul(&field.from_u32(4), &a3),
            &field.mul(&field.from_u32(27), &b2),
        );
        validate::parameter(!field.is_zero(&disc), "a, b", "curve is singular")?;

        let curve = CurveParams {
            name: def.name.to_string(),
            field,
            scalars,
            a,
            b,
            generator: AffinePoint::from_coordinates_unchecked(g_x, g_y),
            cofactor: def.h,
        };

        validate::parameter(
            curve.equation_holds(&g_x, &g_y),
            "G",
            "base point is not on the curve",
        )?;
        validate::parameter(
            curve.is_in_subgroup(&curve.generator),
            "n",
            "n·G is not the identity",
        )?;

        Ok(curve)
    }

    /// Parameters of a built-in curve
    pub fn named(curve: NamedCurve) -> Result<Self> {
        Self::new(&curve.definition())
    }

    /// Curve name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base field 𝔽ₚ
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// The scalar ring ℤₙ
    pub fn scalars(&self) -> &ScalarField {
        &self.scalars
    }

    /// Coefficient a
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    /// Coefficient b
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    /// Base point G
    pub fn generator(&self) -> &AffinePoint {
        &self.generator
    }

    /// Cofactor h
    pub fn cofactor(&self) -> u32 {
        self.cofactor
    }

    /// Group order n as big-endian bytes
    pub fn order_bytes(&self) -> Vec<u8> {
        self.scalars.order_bytes()
    }

    /// Width of an encoded field element
    pub fn field_size(&self) -> usize {
        self.field.byte_len()
    }

    /// Width of an encoded scalar
    pub fn scalar_size(&self) -> usize {
        self.scalars.byte_len()
    }

    /// Affine x-coordinate reduced mod n, or `None` for the identity
    pub fn x_to_scalar(&self, p: &AffinePoint) -> Option<Scalar> {
        if p.is_identity() {
            return None;
        }
        Some(self.scalars.reduce_bytes(&self.field.to_bytes(&p.x)))
    }
}

impl fmt::Display for CurveParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

//! Short-Weierstrass point arithmetic
//!
//! Public values are affine; the group law runs in Jacobian coordinates
//! (X:Y:Z) with x = X/Z² and y = Y/Z³. Points carry no reference to their
//! curve, so every operation goes through a [`CurveParams`].

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::curve::CurveParams;
use super::field::FieldElement;
use super::scalar::Scalar;

/// Format of a serialized elliptic-curve point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    /// Identity point (all zeros)
    Identity,
    /// Uncompressed: 0x04 ∥ x ∥ y
    Uncompressed,
    /// Compressed: 0x02/0x03 ∥ x
    Compressed,
}

/// Affine coordinates (x, y) or the point at infinity
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) infinity: Choice,
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        let a_id: bool = self.infinity.into();
        let b_id: bool = other.infinity.into();
        if a_id || b_id {
            return a_id == b_id;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for AffinePoint {}

impl AffinePoint {
    /// The identity (point at infinity)
    pub fn identity() -> Self {
        AffinePoint {
            x: FieldElement::default(),
            y: FieldElement::default(),
            infinity: Choice::from(1),
        }
    }

    /// Is this the identity point?
    pub fn is_identity(&self) -> bool {
        self.infinity.into()
    }

    /// Only for coordinates already known to satisfy the curve equation
    pub(crate) fn from_coordinates_unchecked(x: FieldElement, y: FieldElement) -> Self {
        AffinePoint {
            x,
            y,
            infinity: Choice::from(0),
        }
    }
}

/// Jacobian coordinates (X:Y:Z) for efficient arithmetic
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectivePoint {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let flag = u8::conditional_select(
            &a.is_identity.unwrap_u8(),
            &b.is_identity.unwrap_u8(),
            choice,
        );
        ProjectivePoint {
            is_identity: Choice::from(flag),
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ProjectivePoint {
    pub(crate) fn identity(curve: &CurveParams) -> Self {
        let fp = curve.field();
        ProjectivePoint {
            is_identity: Choice::from(1),
            x: fp.one(),
            y: fp.one(),
            z: fp.zero(),
        }
    }

    pub(crate) fn from_affine(p: &AffinePoint, curve: &CurveParams) -> Self {
        let fp = curve.field();
        let lifted = ProjectivePoint {
            is_identity: Choice::from(0),
            x: p.x,
            y: p.y,
            z: fp.one(),
        };
        Self::conditional_select(&lifted, &Self::identity(curve), p.infinity)
    }

    /// Back to affine; a zero Z is treated as the identity
    pub(crate) fn to_affine(&self, curve: &CurveParams) -> AffinePoint {
        if self.is_identity.into() {
            return AffinePoint::identity();
        }
        let fp = curve.field();
        let z_inv = match fp.invert(&self.z) {
            Ok(inv) => inv,
            Err(_) => return AffinePoint::identity(),
        };
        let z_inv2 = fp.square(&z_inv);
        let z_inv3 = fp.mul(&z_inv2, &z_inv);
        AffinePoint::from_coordinates_unchecked(fp.mul(&self.x, &z_inv2), fp.mul(&self.y, &z_inv3))
    }

    /// Doubling for a general coefficient a (dbl-2007-bl)
    pub(crate) fn double(&self, curve: &CurveParams) -> Self {
        let fp = curve.field();

        let xx = fp.square(&self.x);
        let yy = fp.square(&self.y);
        let yyyy = fp.square(&yy);
        let zz = fp.square(&self.z);

        // S = 2·((X + YY)² − XX − YYYY)
        let s = fp.double(&fp.sub(&fp.sub(&fp.square(&fp.add(&self.x, &yy)), &xx), &yyyy));

        // M = 3·XX + a·ZZ²
        let m = fp.add(
            &fp.add(&fp.double(&xx), &xx),
            &fp.mul(curve.a(), &fp.square(&zz)),
        );

        // X3 = M² − 2S
        let x3 = fp.sub(&fp.square(&m), &fp.double(&s));

        // Y3 = M·(S − X3) − 8·YYYY
        let eight_yyyy = fp.double(&fp.double(&fp.double(&yyyy)));
        let y3 = fp.sub(&fp.mul(&m, &fp.sub(&s, &x3)), &eight_yyyy);

        // Z3 = (Y + Z)² − YY − ZZ = 2YZ
        let z3 = fp.sub(&fp.sub(&fp.square(&fp.add(&self.y, &self.z)), &yy), &zz);

        let doubled = ProjectivePoint {
            is_identity: z3.ct_eq(&fp.zero()),
            x: x3,
            y: y3,
            z: z3,
        };
        Self::conditional_select(&doubled, &Self::identity(curve), self.is_identity)
    }

    /// General addition with the P = Q and P = −Q cases folded in by select
    pub(crate) fn add(&self, other: &Self, curve: &CurveParams) -> Self {
        let fp = curve.field();

        let z1z1 = fp.square(&self.z);
        let z2z2 = fp.square(&other.z);
        let u1 = fp.mul(&self.x, &z2z2);
        let u2 = fp.mul(&other.x, &z1z1);
        let s1 = fp.mul(&self.y, &fp.mul(&other.z, &z2z2));
        let s2 = fp.mul(&other.y, &fp.mul(&self.z, &z1z1));

        let h = fp.sub(&u2, &u1);
        let r = fp.sub(&s2, &s1);

        let hh = fp.square(&h);
        let hhh = fp.mul(&h, &hh);
        let v = fp.mul(&u1, &hh);

        // X3 = R² − HHH − 2V
        let x3 = fp.sub(&fp.sub(&fp.square(&r), &hhh), &fp.double(&v));
        // Y3 = R·(V − X3) − S1·HHH
        let y3 = fp.sub(&fp.mul(&r, &fp.sub(&v, &x3)), &fp.mul(&s1, &hhh));
        // Z3 = Z1·Z2·H
        let z3 = fp.mul(&fp.mul(&self.z, &other.z), &h);

        let sum = ProjectivePoint {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
            z: z3,
        };

        let h_zero = h.ct_eq(&fp.zero());
        let r_zero = r.ct_eq(&fp.zero());

        let mut out = sum;
        out = Self::conditional_select(&out, &self.double(curve), h_zero & r_zero);
        out = Self::conditional_select(&out, &Self::identity(curve), h_zero & !r_zero);
        out = Self::conditional_select(&out, other, self.is_identity);
        Self::conditional_select(&out, self, other.is_identity)
    }
}

impl CurveParams {
    /// P + Q
    pub fn point_add(&self, p: &AffinePoint, q: &AffinePoint) -> AffinePoint {
        let p = ProjectivePoint::from_affine(p, self);
        let q = ProjectivePoint::from_affine(q, self);
        p.add(&q, self).to_affine(self)
    }

    /// 2P
    pub fn point_double(&self, p: &AffinePoint) -> AffinePoint {
        ProjectivePoint::from_affine(p, self)
            .double(self)
            .to_affine(self)
    }

    /// −P = (x, −y)
    pub fn negate_point(&self, p: &AffinePoint) -> AffinePoint {
        if p.is_identity() {
            return *p;
        }
        AffinePoint::from_coordinates_unchecked(p.x, self.field().negate(&p.y))
    }

    /// k·P, MSB first, with an add computed for every bit
    ///
    /// Runs over the full bit length of n whatever the value of k; k = 0
    /// gives the identity.
    pub fn scalar_mul(&self, k: &Scalar, p: &AffinePoint) -> AffinePoint {
        let base = ProjectivePoint::from_affine(p, self);
        let mut acc = ProjectivePoint::identity(self);

        for i in (0..self.scalars().bits()).rev() {
            acc = acc.double(self);
            let sum = acc.add(&base, self);
            acc = ProjectivePoint::conditional_select(&acc, &sum, k.bit(i));
        }

        acc.to_affine(self)
    }

    /// k·P for a big-endian integer of any length, reduced mod n first
    pub fn scalar_mul_bytes(&self, k: &[u8], p: &AffinePoint) -> AffinePoint {
        let k = self.scalars().reduce_bytes(k);
        self.scalar_mul(&k, p)
    }

    /// k·G
    pub fn mul_generator(&self, k: &Scalar) -> AffinePoint {
        self.scalar_mul(k, self.generator())
    }

    /// u1·G + u2·Q
    pub fn mul_add_generator(&self, u1: &Scalar, u2: &Scalar, q: &AffinePoint) -> AffinePoint {
        let lhs = ProjectivePoint::from_affine(&self.mul_generator(u1), self);
        let rhs = ProjectivePoint::from_affine(&self.scalar_mul(u2, q), self);
        lhs.add(&rhs, self).to_affine(self)
    }

    /// Does the point satisfy y² = x³ + ax + b with coordinates in range?
    ///
    /// The identity counts as on the curve.
    pub fn is_on_curve(&self, p: &AffinePoint) -> bool {
        if p.is_identity() {
            return true;
        }
        let fp = self.field();
        if !fp.contains(&p.x) || !fp.contains(&p.y) {
            return false;
        }
        self.equation_holds(&p.x, &p.y)
    }

    /// n·P = ∞
    pub fn is_in_subgroup(&self, p: &AffinePoint) -> bool {
        // n itself does not fit in a Scalar, so compute (n−1)·P + P
        let n_minus_one = self.scalars().negate(&self.scalars().one());
        let partial = self.scalar_mul(&n_minus_one, p);
        self.point_add(&partial, p).is_identity()
    }

    pub(crate) fn equation_holds(&self, x: &FieldElement, y: &FieldElement) -> bool {
        let fp = self.field();
        let lhs = fp.square(y);
        let rhs = self.rhs(x);
        bool::from(lhs.ct_eq(&rhs))
    }

    /// x³ + ax + b
    pub(crate) fn rhs(&self, x: &FieldElement) -> FieldElement {
        let fp = self.field();
        let x3 = fp.mul(&fp.square(x), x);
        fp.add(&fp.add(&x3, &fp.mul(self.a(), x)), self.b())
    }
}

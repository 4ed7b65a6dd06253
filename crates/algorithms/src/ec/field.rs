//! Prime-field arithmetic over a runtime modulus p
//!
//! A [`PrimeField`] owns the modulus and every operation goes through it;
//! [`FieldElement`] is just a reduced value in Montgomery form, so elements
//! from different fields must never be mixed.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::limbs::{self, Limbs, MAX_BYTES, ZERO};
use super::monty::MontyParams;
use crate::error::{validate, Error, Result};

/// Element of 𝔽ₚ, stored as x·R mod p
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldElement(pub(crate) Limbs);

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement(limbs::select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        limbs::ct_eq(&self.0, &other.0)
    }
}

/// The field 𝔽ₚ for an odd prime p of at most 256 bits
#[derive(Clone, Debug)]
pub struct PrimeField {
    params: MontyParams,
    /// (p + 1) / 4 when p ≡ 3 (mod 4)
    sqrt_exp: Option<Limbs>,
}

impl PrimeField {
    /// Build the field from a big-endian modulus
    ///
    /// Fails unless p is an odd probable prime of at most 256 bits.
    pub fn new(modulus: &[u8]) -> Result<Self> {
        let limbs = limbs::from_be_slice(strip_leading_zeros(modulus))
            .ok_or_else(|| Error::param("p", "modulus wider than 256 bits"))?;
        let params = MontyParams::new(limbs)
            .ok_or_else(|| Error::param("p", "modulus must be odd and at least 3"))?;
        validate::parameter(params.is_probable_prime(), "p", "modulus is not prime")?;

        let sqrt_exp = if limbs[0] & 3 == 3 {
            let (exp, _) = limbs::adc(&limbs::shr(&limbs, 2), &limbs::ONE);
            Some(exp)
        } else {
            None
        };

        Ok(Self { params, sqrt_exp })
    }

    /// Bit length of p
    pub fn bits(&self) -> usize {
        self.params.bits()
    }

    /// Width of an encoded element, ⌈bits/8⌉
    pub fn byte_len(&self) -> usize {
        self.params.bytes()
    }

    /// p as big-endian bytes of `byte_len()` width
    pub fn modulus_bytes(&self) -> Vec<u8> {
        limbs::to_be_bytes(self.params.modulus(), self.byte_len())
    }

    /// Additive identity
    pub fn zero(&self) -> FieldElement {
        FieldElement(ZERO)
    }

    /// Multiplicative identity
    pub fn one(&self) -> FieldElement {
        FieldElement(self.params.one())
    }

    /// Small constant, reduced mod p
    pub fn from_u32(&self, n: u32) -> FieldElement {
        let reduced = self.params.reduce_be_bytes(&n.to_be_bytes());
        FieldElement(self.params.to_monty(&reduced))
    }

    /// Parse a canonical big-endian value; rejects anything ≥ p
    ///
    /// Shorter inputs are treated as left-padded with zeros.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<FieldElement> {
        validate::max_length("field element", bytes.len(), MAX_BYTES)?;
        let value = limbs::from_be_slice(bytes).ok_or(Error::Length {
            context: "field element",
            expected: MAX_BYTES,
            actual: bytes.len(),
        })?;
        if !bool::from(self.params.is_reduced(&value)) {
            return Err(Error::param("field element", "value not less than p"));
        }
        Ok(FieldElement(self.params.to_monty(&value)))
    }

    /// Big-endian encoding of width `byte_len()`
    pub fn to_bytes(&self, a: &FieldElement) -> Vec<u8> {
        limbs::to_be_bytes(&self.params.from_monty(&a.0), self.byte_len())
    }

    /// a + b
    #[inline]
    pub fn add(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement(self.params.add(&a.0, &b.0))
    }

    /// a - b
    #[inline]
    pub fn sub(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement(self.params.sub(&a.0, &b.0))
    }

    /// a · b
    #[inline]
    pub fn mul(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement(self.params.mul(&a.0, &b.0))
    }

    /// a²
    #[inline]
    pub fn square(&self, a: &FieldElement) -> FieldElement {
        FieldElement(self.params.square(&a.0))
    }

    /// 2a
    #[inline]
    pub fn double(&self, a: &FieldElement) -> FieldElement {
        self.add(a, a)
    }

    /// -a
    #[inline]
    pub fn negate(&self, a: &FieldElement) -> FieldElement {
        FieldElement(self.params.neg(&a.0))
    }

    /// Multiplicative inverse; fails only for zero
    pub fn invert(&self, a: &FieldElement) -> Result<FieldElement> {
        if self.is_zero(a) {
            return Err(Error::NotInvertible {
                context: "field element",
            });
        }
        Ok(FieldElement(self.params.invert(&a.0)))
    }

    /// Square root, if one exists
    ///
    /// Only primes p ≡ 3 (mod 4) are supported; other fields yield an
    /// `Err(Parameter)`.
    pub fn sqrt(&self, a: &FieldElement) -> Result<Option<FieldElement>> {
        let exp = self
            .sqrt_exp
            .as_ref()
            .ok_or_else(|| Error::param("p", "square roots need p ≡ 3 (mod 4)"))?;
        let root = FieldElement(self.params.pow(&a.0, exp));
        if self.square(&root) == *a {
            Ok(Some(root))
        } else {
            Ok(None)
        }
    }

    /// Is `a` the zero element?
    pub fn is_zero(&self, a: &FieldElement) -> bool {
        bool::from(limbs::is_zero(&a.0))
    }

    /// Parity of the canonical representative
    pub fn is_odd(&self, a: &FieldElement) -> bool {
        self.params.from_monty(&a.0)[0] & 1 == 1
    }

    /// Whether a value obtained elsewhere is a valid element of this field
    pub(crate) fn contains(&self, a: &FieldElement) -> bool {
        bool::from(self.params.is_reduced(&a.0))
    }

    /// Canonical (non-Montgomery) value
    pub(crate) fn canonical(&self, a: &FieldElement) -> Limbs {
        self.params.from_monty(&a.0)
    }
}

/// Drop leading zero bytes so oversized-but-small encodings still fit
pub(crate) fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

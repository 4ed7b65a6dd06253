//! Integers modulo the group order n
//!
//! Scalars are kept in canonical form (not Montgomery) because they are
//! mostly serialized and scanned bit by bit; products detour through the
//! Montgomery domain internally.

use core::fmt;

use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use ecsign_common::ZeroizeGuard;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::field::strip_leading_zeros;
use super::limbs::{self, Limbs, MAX_BYTES, ONE, ZERO};
use super::monty::MontyParams;
use crate::error::{validate, Error, Result};

/// Upper bound on rejection-sampling rounds in [`ScalarField::random_nonzero`]
pub const MAX_SAMPLING_ATTEMPTS: usize = 64;

/// Integer in `[0, n-1]`, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Scalar(pub(crate) Limbs);

impl Scalar {
    /// Is this scalar zero?
    pub fn is_zero(&self) -> bool {
        bool::from(limbs::is_zero(&self.0))
    }

    #[inline(always)]
    pub(crate) fn bit(&self, i: usize) -> Choice {
        limbs::bit(&self.0, i)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        limbs::ct_eq(&self.0, &other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar([REDACTED])")
    }
}

/// Scalar in `[1, n-1]`, the range valid for private keys and nonces
///
/// Wiped on drop only. There is no public `Zeroize`, so a live value can
/// never be reset to zero:
///
/// ```compile_fail
/// use ecsign_algorithms::{CurveParams, NamedCurve};
/// use zeroize::Zeroize;
///
/// let curve = CurveParams::named(NamedCurve::Secp192k1).unwrap();
/// let mut d = curve.scalars().from_bytes_nonzero(&[5]).unwrap();
/// d.zeroize();
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct NonZeroScalar(Scalar);

impl NonZeroScalar {
    /// Wrap a scalar, rejecting zero
    pub fn new(scalar: Scalar) -> Option<Self> {
        if scalar.is_zero() {
            None
        } else {
            Some(Self(scalar))
        }
    }

    /// Borrow the inner scalar
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }
}

impl Drop for NonZeroScalar {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for NonZeroScalar {}

impl AsRef<Scalar> for NonZeroScalar {
    fn as_ref(&self) -> &Scalar {
        &self.0
    }
}

impl fmt::Debug for NonZeroScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NonZeroScalar([REDACTED])")
    }
}

/// The ring ℤₙ for an odd prime group order n
#[derive(Clone, Debug)]
pub struct ScalarField {
    params: MontyParams,
}

impl ScalarField {
    /// Build from a big-endian order; fails unless n is an odd probable prime
    pub fn new(order: &[u8]) -> Result<Self> {
        let limbs = limbs::from_be_slice(strip_leading_zeros(order))
            .ok_or_else(|| Error::param("n", "order wider than 256 bits"))?;
        let params = MontyParams::new(limbs)
            .ok_or_else(|| Error::param("n", "order must be odd and at least 3"))?;
        validate::parameter(params.is_probable_prime(), "n", "order is not prime")?;
        Ok(Self { params })
    }

    /// Bit length of n (qlen)
    pub fn bits(&self) -> usize {
        self.params.bits()
    }

    /// Width of an encoded scalar, ⌈qlen/8⌉
    pub fn byte_len(&self) -> usize {
        self.params.bytes()
    }

    /// n as big-endian bytes
    pub fn order_bytes(&self) -> Vec<u8> {
        limbs::to_be_bytes(self.params.modulus(), self.byte_len())
    }

    /// Zero scalar
    pub fn zero(&self) -> Scalar {
        Scalar(ZERO)
    }

    /// Scalar one
    pub fn one(&self) -> Scalar {
        Scalar(ONE)
    }

    /// Small value reduced mod n
    pub fn from_u64(&self, v: u64) -> Scalar {
        Scalar(self.params.reduce_be_bytes(&v.to_be_bytes()))
    }

    /// Parse a big-endian scalar, rejecting values ≥ n
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Scalar> {
        validate::max_length("scalar", bytes.len(), MAX_BYTES)?;
        let value = limbs::from_be_slice(bytes).ok_or(Error::Length {
            context: "scalar",
            expected: MAX_BYTES,
            actual: bytes.len(),
        })?;
        if !bool::from(self.params.is_reduced(&value)) {
            return Err(Error::InvalidScalar {
                context: "scalar",
                reason: "value not less than the group order",
            });
        }
        Ok(Scalar(value))
    }

    /// Parse a big-endian scalar in `[1, n-1]`
    pub fn from_bytes_nonzero(&self, bytes: &[u8]) -> Result<NonZeroScalar> {
        NonZeroScalar::new(self.from_bytes(bytes)?).ok_or(Error::InvalidScalar {
            context: "scalar",
            reason: "value is zero",
        })
    }

    /// Reduce a big-endian integer of any length mod n
    pub fn reduce_bytes(&self, bytes: &[u8]) -> Scalar {
        Scalar(self.params.reduce_be_bytes(bytes))
    }

    /// Leftmost-qlen-bits conversion of a digest, then one reduction mod n
    pub fn reduce_digest(&self, digest: &[u8]) -> Scalar {
        let int = self.bits_to_int(digest);
        Scalar(self.params.reduce_once(&int))
    }

    /// Accept a bit string as a nonce candidate if it lands in `[1, n-1]`
    ///
    /// The value is the leftmost qlen bits, with no reduction.
    pub fn nonzero_from_bits(&self, bytes: &[u8]) -> Option<NonZeroScalar> {
        let int = self.bits_to_int(bytes);
        if bool::from(self.params.is_reduced(&int)) {
            NonZeroScalar::new(Scalar(int))
        } else {
            None
        }
    }

    /// Leftmost qlen bits of a big-endian bit string as an integer
    fn bits_to_int(&self, bytes: &[u8]) -> Limbs {
        let qlen = self.bits();
        let qbytes = self.byte_len();
        if bytes.len() > qbytes {
            // Only the first ⌈qlen/8⌉ bytes can contribute
            let head = limbs::from_be_slice(&bytes[..qbytes]).unwrap_or(ZERO);
            limbs::shr(&head, qbytes * 8 - qlen)
        } else if bytes.len() * 8 > qlen {
            let value = limbs::from_be_slice(bytes).unwrap_or(ZERO);
            limbs::shr(&value, bytes.len() * 8 - qlen)
        } else {
            limbs::from_be_slice(bytes).unwrap_or(ZERO)
        }
    }

    /// Big-endian encoding of width `byte_len()`
    pub fn to_bytes(&self, s: &Scalar) -> Vec<u8> {
        limbs::to_be_bytes(&s.0, self.byte_len())
    }

    /// (a + b) mod n
    #[inline]
    pub fn add(&self, a: &Scalar, b: &Scalar) -> Scalar {
        Scalar(self.params.add(&a.0, &b.0))
    }

    /// (a - b) mod n
    #[inline]
    pub fn sub(&self, a: &Scalar, b: &Scalar) -> Scalar {
        Scalar(self.params.sub(&a.0, &b.0))
    }

    /// (a · b) mod n
    #[inline]
    pub fn mul(&self, a: &Scalar, b: &Scalar) -> Scalar {
        // (a·R)·b·R⁻¹ = a·b
        Scalar(self.params.mul(&self.params.to_monty(&a.0), &b.0))
    }

    /// (-a) mod n
    #[inline]
    pub fn negate(&self, a: &Scalar) -> Scalar {
        Scalar(self.params.neg(&a.0))
    }

    /// Multiplicative inverse mod n; zero yields `NotInvertible`
    pub fn invert(&self, a: &Scalar) -> Result<Scalar> {
        if a.is_zero() {
            return Err(Error::NotInvertible { context: "scalar" });
        }
        let inv = self.params.invert(&self.params.to_monty(&a.0));
        Ok(Scalar(self.params.from_monty(&inv)))
    }

    /// s > n/2
    pub fn is_high(&self, s: &Scalar) -> bool {
        let half = limbs::shr(self.params.modulus(), 1);
        bool::from(limbs::lt(&half, &s.0))
    }

    /// Does this scalar lie in `[0, n-1]` for this order?
    pub fn contains(&self, s: &Scalar) -> bool {
        bool::from(self.params.is_reduced(&s.0))
    }

    /// Uniform scalar in `[1, n-1]` by rejection sampling
    ///
    /// Gives up with `RandomSource` after [`MAX_SAMPLING_ATTEMPTS`] draws.
    pub fn random_nonzero<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<NonZeroScalar> {
        let len = self.byte_len();
        let excess_bits = len * 8 - self.bits();
        let mut raw = [0u8; MAX_BYTES];
        let mut buf = ZeroizeGuard::new(&mut raw);

        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            rng.try_fill_bytes(&mut buf[..len])
                .map_err(|_| Error::RandomSource {
                    context: "scalar sampling",
                })?;
            buf[0] &= 0xFF >> excess_bits;

            let value = limbs::from_be_slice(&buf[..len]).unwrap_or(ZERO);
            let accept = self.params.is_reduced(&value) & !limbs::is_zero(&value);
            if bool::from(accept) {
                return Ok(NonZeroScalar(Scalar(value)));
            }
        }
        Err(Error::RandomSource {
            context: "scalar sampling",
        })
    }
}

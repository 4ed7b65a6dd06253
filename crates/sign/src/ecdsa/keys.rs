//! ECDSA key types

use core::fmt;

use ecsign_algorithms::error::to_core_result;
use ecsign_algorithms::{AffinePoint, CurveParams, NonZeroScalar};
use ecsign_api::{Error, Result};
use rand::{CryptoRng, RngCore};
use zeroize::{ZeroizeOnDrop, Zeroizing};

/// Private scalar d in [1, n-1], wiped on drop
///
/// Keys do not remember their curve; pass the same [`CurveParams`] that
/// created them.
///
/// The scalar is wiped when the key drops. A live key cannot be zeroed:
///
/// ```compile_fail
/// use ecsign_algorithms::{CurveParams, NamedCurve};
/// use ecsign_sign::ecdsa::SigningKey;
/// use zeroize::Zeroize;
///
/// let curve = CurveParams::named(NamedCurve::Secp192k1).unwrap();
/// let mut key = SigningKey::from_bytes(&curve, &[5]).unwrap();
/// key.zeroize();
/// ```
#[derive(Clone)]
pub struct SigningKey {
    d: NonZeroScalar,
}

// d is a NonZeroScalar, which wipes itself on drop.
impl ZeroizeOnDrop for SigningKey {}

impl SigningKey {
    /// Draw d uniformly from [1, n-1]
    pub fn random<R: RngCore + CryptoRng>(curve: &CurveParams, rng: &mut R) -> Result<Self> {
        let d = curve.scalars().random_nonzero(rng)?;
        Ok(Self { d })
    }

    /// Decode a big-endian private scalar
    ///
    /// Fails with `InvalidScalar` unless the value lies in [1, n-1].
    pub fn from_bytes(curve: &CurveParams, bytes: &[u8]) -> Result<Self> {
        let d = to_core_result(
            curve.scalars().from_bytes_nonzero(bytes),
            "ECDSA private key",
        )?;
        Ok(Self { d })
    }

    /// Fixed-width big-endian encoding, wiped on drop
    pub fn to_bytes(&self, curve: &CurveParams) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(curve.scalars().to_bytes(self.d.as_scalar()))
    }

    /// Q = d·G
    pub fn verifying_key(&self, curve: &CurveParams) -> VerifyingKey {
        VerifyingKey {
            point: curve.mul_generator(self.d.as_scalar()),
        }
    }

    pub(crate) fn scalar(&self) -> &NonZeroScalar {
        &self.d
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

/// Public point Q, validated on construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    point: AffinePoint,
}

impl VerifyingKey {
    /// Wrap a point after full public-key validation
    pub fn from_point(curve: &CurveParams, point: AffinePoint) -> Result<Self> {
        if !super::validate_public_key(curve, &point) {
            return Err(Error::public_key(
                "ECDSA public key",
                "point is the identity, off the curve or outside the subgroup",
            ));
        }
        Ok(Self { point })
    }

    /// Decode a SEC1 compressed or uncompressed point
    pub fn from_sec1_bytes(curve: &CurveParams, bytes: &[u8]) -> Result<Self> {
        let point = to_core_result(curve.deserialize_point(bytes), "ECDSA public key")?;
        Self::from_point(curve, point)
    }

    /// SEC1 encoding, compressed or uncompressed
    pub fn to_sec1_bytes(&self, curve: &CurveParams, compressed: bool) -> Vec<u8> {
        if compressed {
            curve.serialize_compressed(&self.point)
        } else {
            curve.serialize_uncompressed(&self.point)
        }
    }

    /// The underlying point
    pub fn as_point(&self) -> &AffinePoint {
        &self.point
    }
}

/// A signing key with its matching verifying key
#[derive(Clone, Debug)]
pub struct KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Pair a signing key with its derived public key
    pub fn from_signing_key(curve: &CurveParams, signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key(curve);
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Private half
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Public half
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Split into owned halves
    pub fn into_parts(self) -> (SigningKey, VerifyingKey) {
        (self.signing_key, self.verifying_key)
    }
}

impl AsRef<SigningKey> for KeyPair {
    fn as_ref(&self) -> &SigningKey {
        &self.signing_key
    }
}

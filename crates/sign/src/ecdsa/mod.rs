//! ECDSA over short-Weierstrass prime-field curves
//!
//! Implements key generation, signing and verification as described in
//! FIPS 186-4 §6 and SEC 1 §4.1, for any curve expressible as
//! [`CurveParams`]. Functions take the curve explicitly and operate on a
//! caller-supplied digest; hashing the message is left to the caller (see
//! [`HashAlgorithm::digest`]).
//!
//! ```
//! use ecsign_algorithms::{CurveParams, NamedCurve};
//! use ecsign_sign::ecdsa::{self, HashAlgorithm};
//! use rand::rngs::OsRng;
//!
//! let curve = CurveParams::named(NamedCurve::Secp256r1).unwrap();
//! let keys = ecdsa::generate_keypair(&curve, &mut OsRng).unwrap();
//! let digest = HashAlgorithm::Sha256.digest(b"hello");
//! let sig = ecdsa::sign(&curve, keys.signing_key(), &digest, &mut OsRng).unwrap();
//! assert!(ecdsa::verify(&curve, keys.verifying_key(), &digest, &sig).unwrap());
//! ```

mod config;
mod keys;
mod nonce;
mod signature;

pub use config::{DigestReduction, EcdsaConfig, HashAlgorithm, NonceMode, DEFAULT_MAX_ATTEMPTS};
pub use keys::{KeyPair, SigningKey, VerifyingKey};
pub use signature::Signature;

use ecsign_algorithms::{AffinePoint, CurveParams, NamedCurve};
use ecsign_api::{Error, Result, SignatureScheme};
use ecsign_common::ct_eq;
use rand::{CryptoRng, RngCore};

/// Generate a key pair with d uniform in [1, n-1]
pub fn generate_keypair<R: RngCore + CryptoRng>(
    curve: &CurveParams,
    rng: &mut R,
) -> Result<KeyPair> {
    let signing_key = SigningKey::random(curve, rng)?;
    let pair = KeyPair::from_signing_key(curve, signing_key);
    log::debug!("generated ECDSA key pair on {}", curve.name());
    Ok(pair)
}

/// Q = d·G for an existing private key
pub fn derive_public_key(curve: &CurveParams, signing_key: &SigningKey) -> VerifyingKey {
    signing_key.verifying_key(curve)
}

/// Full public-key validation
///
/// Rejects the identity, coordinates outside 𝔽ₚ, points off the curve and,
/// for curves with a cofactor, points outside the order-n subgroup. With
/// cofactor 1 every curve point already has order n.
pub fn validate_public_key(curve: &CurveParams, point: &AffinePoint) -> bool {
    if point.is_identity() || !curve.is_on_curve(point) {
        return false;
    }
    curve.cofactor() == 1 || curve.is_in_subgroup(point)
}

/// Sign a digest with the default [`EcdsaConfig`]
pub fn sign<R: RngCore + CryptoRng>(
    curve: &CurveParams,
    signing_key: &SigningKey,
    digest: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    sign_with_config(curve, &EcdsaConfig::default(), signing_key, digest, rng)
}

/// Sign with a raw big-endian private scalar
///
/// Fails with `InvalidScalar` when `d` is 0 or not below n.
pub fn sign_raw<R: RngCore + CryptoRng>(
    curve: &CurveParams,
    d: &[u8],
    digest: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    let key = SigningKey::from_bytes(curve, d)?;
    sign(curve, &key, digest, rng)
}

/// Sign a digest under an explicit policy
pub fn sign_with_config<R: RngCore + CryptoRng>(
    curve: &CurveParams,
    config: &EcdsaConfig,
    signing_key: &SigningKey,
    digest: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    config.validate()?;
    config.check_digest(digest)?;

    let zq = curve.scalars();
    let d = signing_key.scalar();
    if d.as_scalar().is_zero() || !zq.contains(d.as_scalar()) {
        return Err(Error::scalar(
            "ECDSA signing",
            "private key is outside [1, n-1]",
        ));
    }

    let e = config.reduction.reduce(zq, digest);
    let mut nonces = nonce::source(zq, config, d, digest, rng)?;

    for attempt in 1..=config.max_attempts {
        let k = match nonces.next_candidate(zq)? {
            Some(k) => k,
            None => {
                log::debug!("nonce candidate out of range (attempt {})", attempt);
                continue;
            }
        };

        let big_r = curve.mul_generator(k.as_scalar());
        let r = match curve.x_to_scalar(&big_r) {
            Some(r) if !r.is_zero() => r,
            _ => {
                log::debug!("r = 0, retrying (attempt {})", attempt);
                continue;
            }
        };

        // s = k⁻¹(e + r·d)
        let k_inv = zq.invert(k.as_scalar())?;
        let rd = zq.mul(&r, d.as_scalar());
        let s = zq.mul(&k_inv, &zq.add(&e, &rd));
        if s.is_zero() {
            log::debug!("s = 0, retrying (attempt {})", attempt);
            continue;
        }

        let s = if config.low_s && zq.is_high(&s) {
            zq.negate(&s)
        } else {
            s
        };

        #[cfg(feature = "trace")]
        log::trace!(
            "signed {}-byte digest on {} ({:?} nonce, {} attempt(s))",
            digest.len(),
            curve.name(),
            config.nonce,
            attempt
        );

        return Signature::new(zq.to_bytes(&r), zq.to_bytes(&s));
    }

    Err(Error::random(
        "ECDSA signing",
        format!("no valid signature after {} attempts", config.max_attempts),
    ))
}

/// Verify with the default [`EcdsaConfig`]
pub fn verify(
    curve: &CurveParams,
    verifying_key: &VerifyingKey,
    digest: &[u8],
    signature: &Signature,
) -> Result<bool> {
    verify_with_config(
        curve,
        &EcdsaConfig::default(),
        verifying_key,
        digest,
        signature,
    )
}

/// Verify under an explicit policy
///
/// A well-formed signature that does not match gives `Ok(false)`. Errors are
/// reserved for a digest of the wrong length and a signature whose width
/// does not match the curve.
pub fn verify_with_config(
    curve: &CurveParams,
    config: &EcdsaConfig,
    verifying_key: &VerifyingKey,
    digest: &[u8],
    signature: &Signature,
) -> Result<bool> {
    config.check_digest(digest)?;

    let zq = curve.scalars();
    if signature.component_len() != zq.byte_len() {
        return Err(Error::encoding(
            "ECDSA verify",
            format!(
                "components are {} bytes, curve needs {}",
                signature.component_len(),
                zq.byte_len()
            ),
        ));
    }

    let outcome = check_signature(curve, config, verifying_key, digest, signature)?;

    #[cfg(feature = "trace")]
    log::trace!(
        "verification on {}: {}",
        curve.name(),
        if outcome { "accepted" } else { "rejected" }
    );

    Ok(outcome)
}

fn check_signature(
    curve: &CurveParams,
    config: &EcdsaConfig,
    verifying_key: &VerifyingKey,
    digest: &[u8],
    signature: &Signature,
) -> Result<bool> {
    let zq = curve.scalars();

    // r, s ∈ [1, n-1]
    let (r, s) = match (
        zq.from_bytes_nonzero(signature.r()),
        zq.from_bytes_nonzero(signature.s()),
    ) {
        (Ok(r), Ok(s)) => (r, s),
        _ => return Ok(false),
    };
    if config.low_s && zq.is_high(s.as_scalar()) {
        return Ok(false);
    }

    let q = verifying_key.as_point();
    if q.is_identity() || !curve.is_on_curve(q) {
        log::debug!("verifying key does not belong to {}", curve.name());
        return Ok(false);
    }

    let e = config.reduction.reduce(zq, digest);
    let w = zq.invert(s.as_scalar())?;
    let u1 = zq.mul(&e, &w);
    let u2 = zq.mul(r.as_scalar(), &w);

    let point = curve.mul_add_generator(&u1, &u2, q);
    let v = match curve.x_to_scalar(&point) {
        Some(v) => v,
        None => return Ok(false),
    };

    Ok(ct_eq(zq.to_bytes(&v), zq.to_bytes(r.as_scalar())))
}

/// ECDSA bound to one curve and one policy
///
/// Implements [`SignatureScheme`] so the engine can be used behind the
/// generic trait.
#[derive(Clone, Debug)]
pub struct Ecdsa {
    curve: CurveParams,
    config: EcdsaConfig,
}

impl Ecdsa {
    /// Engine over a validated curve
    pub fn new(curve: CurveParams, config: EcdsaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { curve, config })
    }

    /// Engine over a built-in curve with the default policy
    pub fn named(curve: NamedCurve) -> Result<Self> {
        Self::new(CurveParams::named(curve)?, EcdsaConfig::default())
    }

    /// The curve
    pub fn curve(&self) -> &CurveParams {
        &self.curve
    }

    /// The policy
    pub fn config(&self) -> &EcdsaConfig {
        &self.config
    }
}

impl SignatureScheme for Ecdsa {
    type PublicKey = VerifyingKey;
    type SecretKey = SigningKey;
    type SignatureData = Signature;
    type KeyPair = KeyPair;

    fn name(&self) -> String {
        format!("ECDSA-{}-{}", self.curve.name(), self.config.hash)
    }

    fn keypair<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<Self::KeyPair> {
        generate_keypair(&self.curve, rng)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        *keypair.verifying_key()
    }

    fn sign_digest<R: CryptoRng + RngCore>(
        &self,
        digest: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> Result<Self::SignatureData> {
        sign_with_config(&self.curve, &self.config, secret_key, digest, rng)
    }

    fn verify_digest(
        &self,
        digest: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<bool> {
        verify_with_config(&self.curve, &self.config, public_key, digest, signature)
    }
}

//! Digital signature traits for ecsign
//!
//! The scheme object carries its domain parameters (curve and policy), so
//! every method takes `&self`. The design prioritizes security by not
//! requiring mutable or byte-level access to secret keys.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::ZeroizeOnDrop;

/// Core trait for digest-signing algorithms
///
/// Implementations sign an already-computed message digest. Hashing the
/// message is the caller's concern, which keeps the digest length an explicit,
/// validated parameter of the scheme.
///
/// # Type Safety
///
/// Secret keys are opaque types that cannot be directly manipulated as bytes.
/// Implementations must not expose `AsMut<[u8]>` on them.
pub trait SignatureScheme {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type - wiped on drop, never byte-accessible or resettable
    type SecretKey: ZeroizeOnDrop;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type
    type KeyPair;

    /// Returns the name of this signature algorithm instance
    fn name(&self) -> String;

    /// Generate a new key pair using the provided RNG
    ///
    /// # Security Requirements
    ///
    /// Implementations must use the provided cryptographically secure RNG
    /// for all random number generation.
    fn keypair<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Sign a digest with the given secret key
    ///
    /// The RNG may be ignored by deterministic nonce policies.
    fn sign_digest<R: CryptoRng + RngCore>(
        &self,
        digest: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> Result<Self::SignatureData>;

    /// Verify a signature against a digest and public key
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not match;
    /// `Err` is reserved for structurally invalid input.
    fn verify_digest(
        &self,
        digest: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<bool>;
}

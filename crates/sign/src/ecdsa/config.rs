//! Signing and verification policy

use core::fmt;

use ecsign_algorithms::{Scalar, ScalarField};
use ecsign_api::{error::validate, Result};
use ecsign_params::utils::hash::{
    SHA224_OUTPUT_SIZE, SHA256_BLOCK_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE,
    SHA512_BLOCK_SIZE, SHA512_OUTPUT_SIZE,
};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// Hash function whose output the engine signs
///
/// Fixes the expected digest length and the HMAC used for RFC 6979 nonces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HashAlgorithm {
    /// SHA-224
    Sha224,
    /// SHA-256
    #[default]
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha224 => SHA224_OUTPUT_SIZE,
            HashAlgorithm::Sha256 => SHA256_OUTPUT_SIZE,
            HashAlgorithm::Sha384 => SHA384_OUTPUT_SIZE,
            HashAlgorithm::Sha512 => SHA512_OUTPUT_SIZE,
        }
    }

    /// Internal block length in bytes
    pub fn block_size(self) -> usize {
        match self {
            HashAlgorithm::Sha224 | HashAlgorithm::Sha256 => SHA256_BLOCK_SIZE,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha512 => SHA512_BLOCK_SIZE,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha224 => "SHA-224",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Hash a message with this algorithm
    pub fn digest(self, message: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha224 => Sha224::digest(message).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(message).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(message).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(message).to_vec(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where per-signature nonces come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NonceMode {
    /// RFC 6979 HMAC-DRBG seeded from the key and digest; the RNG is unused
    Deterministic,
    /// RFC 6979 with fresh random bytes mixed in (RFC 6979 §3.6)
    #[default]
    Hedged,
    /// Rejection sampling straight from the RNG
    Random,
}

/// How a digest becomes the integer e
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigestReduction {
    /// Leftmost qlen bits, then mod n (FIPS 186-4, SEC 1)
    #[default]
    Truncate,
    /// The whole digest as a big-endian integer mod n
    Wide,
}

impl DigestReduction {
    /// Map a digest to a scalar
    pub fn reduce(self, scalars: &ScalarField, digest: &[u8]) -> Scalar {
        match self {
            DigestReduction::Truncate => scalars.reduce_digest(digest),
            DigestReduction::Wide => scalars.reduce_bytes(digest),
        }
    }
}

/// Default bound on nonce retries
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// ECDSA policy shared by signing and verification
///
/// Signer and verifier must agree on `hash` and `reduction`; `low_s` on the
/// verifier additionally rejects high-s signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EcdsaConfig {
    /// Expected digest algorithm
    pub hash: HashAlgorithm,
    /// Nonce derivation
    pub nonce: NonceMode,
    /// Normalize s to the lower half of [1, n-1] and require it on verify
    pub low_s: bool,
    /// Digest to scalar conversion
    pub reduction: DigestReduction,
    /// Bound on nonce retries before giving up
    pub max_attempts: u32,
}

impl Default for EcdsaConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::default(),
            nonce: NonceMode::default(),
            low_s: false,
            reduction: DigestReduction::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl EcdsaConfig {
    /// Default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the digest algorithm
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    /// Set the nonce mode
    pub fn with_nonce(mut self, nonce: NonceMode) -> Self {
        self.nonce = nonce;
        self
    }

    /// Enable or disable the low-s rule
    pub fn with_low_s(mut self, low_s: bool) -> Self {
        self.low_s = low_s;
        self
    }

    /// Set the digest reduction
    pub fn with_reduction(mut self, reduction: DigestReduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Set the retry bound
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Reject a config that could never produce a signature
    pub fn validate(&self) -> Result<()> {
        validate::parameter(
            self.max_attempts > 0,
            "ECDSA config",
            "max_attempts must be at least 1",
        )
    }

    /// Check a digest against the configured hash output size
    pub fn check_digest(&self, digest: &[u8]) -> Result<()> {
        validate::length("ECDSA digest", digest.len(), self.hash.output_size())
    }
}

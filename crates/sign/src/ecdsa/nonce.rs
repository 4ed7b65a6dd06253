//! Per-signature nonce generation
//!
//! Deterministic and hedged nonces follow RFC 6979 §3.2 (with the §3.6
//! additional-data variant); random nonces are sampled from the caller's RNG.

use core::marker::PhantomData;

use ecsign_algorithms::{NonZeroScalar, ScalarField};
use ecsign_api::{Error, Result};
use ecsign_common::{SecretBuffer, SecretVec};
use hmac::{Mac, SimpleHmac};
use rand::{CryptoRng, RngCore};
use sha2::digest::core_api::BlockSizeUser;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use super::config::{EcdsaConfig, HashAlgorithm, NonceMode};

/// Bytes of fresh randomness mixed into hedged nonces
pub(crate) const HEDGE_LEN: usize = 32;

/// Source of nonce candidates for one signing call
///
/// Each call yields the next candidate. `Ok(None)` means the candidate was
/// out of range and the caller should count an attempt and ask again.
pub(crate) trait NonceSource {
    fn next_candidate(&mut self, scalars: &ScalarField) -> Result<Option<NonZeroScalar>>;
}

/// HMAC-DRBG from RFC 6979 §3.2 over hash `D`
pub(crate) struct Rfc6979<D> {
    k: SecretVec,
    v: SecretVec,
    started: bool,
    _hash: PhantomData<D>,
}

fn hmac<D: Digest + BlockSizeUser>(key: &[u8], parts: &[&[u8]]) -> Result<SecretVec> {
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key)
        .map_err(|_| Error::param("RFC 6979", "HMAC rejected the key"))?;
    for part in parts {
        mac.update(part);
    }
    Ok(SecretVec::from_slice(&mac.finalize().into_bytes()))
}

impl<D: Digest + BlockSizeUser> Rfc6979<D> {
    /// Steps b-g: seed from int2octets(x), bits2octets(h1) and optional extra data
    pub(crate) fn new(x: &[u8], h1: &[u8], extra: &[u8]) -> Result<Self> {
        let hlen = <D as Digest>::output_size();
        let mut drbg = Self {
            k: SecretVec::filled(0x00, hlen),
            v: SecretVec::filled(0x01, hlen),
            started: false,
            _hash: PhantomData,
        };
        drbg.mix(0x00, &[x, h1, extra])?;
        drbg.mix(0x01, &[x, h1, extra])?;
        Ok(drbg)
    }

    /// K = HMAC_K(V ∥ sep ∥ data), V = HMAC_K(V)
    fn mix(&mut self, sep: u8, data: &[&[u8]]) -> Result<()> {
        let mut parts: Vec<&[u8]> = Vec::with_capacity(data.len() + 2);
        parts.push(self.v.as_slice());
        parts.push(core::slice::from_ref(&sep));
        parts.extend_from_slice(data);
        self.k = hmac::<D>(self.k.as_slice(), &parts)?;
        self.step()
    }

    /// V = HMAC_K(V)
    fn step(&mut self) -> Result<()> {
        let v = hmac::<D>(self.k.as_slice(), &[self.v.as_slice()])?;
        self.v.replace(v.as_slice());
        Ok(())
    }
}

impl<D: Digest + BlockSizeUser> NonceSource for Rfc6979<D> {
    fn next_candidate(&mut self, scalars: &ScalarField) -> Result<Option<NonZeroScalar>> {
        if self.started {
            // Step h.3 after a rejected candidate
            self.mix(0x00, &[])?;
        }
        self.started = true;

        let mut t = SecretVec::default();
        while t.len() < scalars.byte_len() {
            self.step()?;
            t.extend_from_slice(self.v.as_slice());
        }
        Ok(scalars.nonzero_from_bits(t.as_slice()))
    }
}

/// Nonces drawn uniformly from the caller's RNG
pub(crate) struct RandomNonces<'r, R> {
    rng: &'r mut R,
}

impl<R: RngCore + CryptoRng> NonceSource for RandomNonces<'_, R> {
    fn next_candidate(&mut self, scalars: &ScalarField) -> Result<Option<NonZeroScalar>> {
        Ok(Some(scalars.random_nonzero(self.rng)?))
    }
}

fn rfc6979_source<'a>(
    hash: HashAlgorithm,
    x: &[u8],
    h1: &[u8],
    extra: &[u8],
) -> Result<Box<dyn NonceSource + 'a>> {
    Ok(match hash {
        HashAlgorithm::Sha224 => Box::new(Rfc6979::<Sha224>::new(x, h1, extra)?),
        HashAlgorithm::Sha256 => Box::new(Rfc6979::<Sha256>::new(x, h1, extra)?),
        HashAlgorithm::Sha384 => Box::new(Rfc6979::<Sha384>::new(x, h1, extra)?),
        HashAlgorithm::Sha512 => Box::new(Rfc6979::<Sha512>::new(x, h1, extra)?),
    })
}

/// Pick the nonce source described by `config`
///
/// `d` is the private scalar and `digest` the raw message digest; both only
/// feed the DRBG and are never logged.
pub(crate) fn source<'r, R: RngCore + CryptoRng>(
    scalars: &ScalarField,
    config: &EcdsaConfig,
    d: &NonZeroScalar,
    digest: &[u8],
    rng: &'r mut R,
) -> Result<Box<dyn NonceSource + 'r>> {
    match config.nonce {
        NonceMode::Random => Ok(Box::new(RandomNonces { rng })),
        NonceMode::Deterministic | NonceMode::Hedged => {
            let x = SecretVec::new(scalars.to_bytes(d.as_scalar()));
            let h1 = scalars.to_bytes(&scalars.reduce_digest(digest));

            let mut hedge = SecretBuffer::<HEDGE_LEN>::zeroed();
            let extra: &[u8] = if config.nonce == NonceMode::Hedged {
                rng.try_fill_bytes(hedge.as_mut_slice())?;
                hedge.as_slice()
            } else {
                &[]
            };

            rfc6979_source(config.hash, x.as_slice(), &h1, extra)
        }
    }
}

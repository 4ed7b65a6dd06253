//! Shared fixtures for the ecsign integration and property tests

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// 31 zero bytes followed by 0x01, the fixed-key secp192k1 digest
pub fn scenario_digest() -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest[31] = 0x01;
    digest
}

/// Reproducible RNG for a test case
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

//! Property-based tests for ECDSA signing and verification

use ecsign::prelude::*;
use proptest::prelude::*;
use ecsign_tests::seeded_rng;

fn curve_strategy() -> impl Strategy<Value = NamedCurve> {
    prop::sample::select(NamedCurve::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn sign_verify_roundtrip(
        named in curve_strategy(),
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        let curve = CurveParams::named(named).unwrap();
        let mut rng = seeded_rng(seed);
        let keys = generate_keypair(&curve, &mut rng).unwrap();
        let digest = HashAlgorithm::Sha256.digest(&message);

        let sig = sign(&curve, keys.signing_key(), &digest, &mut rng).unwrap();
        prop_assert!(verify(&curve, keys.verifying_key(), &digest, &sig).unwrap());
    }

    #[test]
    fn tampered_digest_rejected(
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 1..128),
        bit in 0usize..192
    ) {
        // On a 192-bit curve the first 192 digest bits feed e
        let curve = CurveParams::named(NamedCurve::Secp192k1).unwrap();
        let mut rng = seeded_rng(seed);
        let keys = generate_keypair(&curve, &mut rng).unwrap();
        let digest = HashAlgorithm::Sha256.digest(&message);
        let sig = sign(&curve, keys.signing_key(), &digest, &mut rng).unwrap();

        let mut tampered = digest.clone();
        tampered[bit / 8] ^= 0x80 >> (bit % 8);
        prop_assert!(!verify(&curve, keys.verifying_key(), &tampered, &sig).unwrap());
    }

    #[test]
    fn wide_reduction_uses_every_bit(
        seed in any::<u64>(),
        bit in 0usize..256
    ) {
        let curve = CurveParams::named(NamedCurve::Secp192r1).unwrap();
        let config = EcdsaConfig::new().with_reduction(DigestReduction::Wide);
        let mut rng = seeded_rng(seed);
        let keys = generate_keypair(&curve, &mut rng).unwrap();
        let digest = HashAlgorithm::Sha256.digest(&seed.to_le_bytes());
        let sig = sign_with_config(&curve, &config, keys.signing_key(), &digest, &mut rng).unwrap();

        let mut tampered = digest.clone();
        tampered[bit / 8] ^= 0x80 >> (bit % 8);
        prop_assert!(
            !verify_with_config(&curve, &config, keys.verifying_key(), &tampered, &sig).unwrap()
        );
    }

    #[test]
    fn deterministic_nonces_repeat(
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        let curve = CurveParams::named(NamedCurve::Secp256k1).unwrap();
        let config = EcdsaConfig::new().with_nonce(NonceMode::Deterministic);
        let mut rng = seeded_rng(seed);
        let keys = generate_keypair(&curve, &mut rng).unwrap();
        let digest = HashAlgorithm::Sha256.digest(&message);

        let a = sign_with_config(&curve, &config, keys.signing_key(), &digest, &mut rng).unwrap();
        let b = sign_with_config(&curve, &config, keys.signing_key(), &digest, &mut rng).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn malleated_signature_needs_high_s_allowed(
        seed in any::<u64>()
    ) {
        let curve = CurveParams::named(NamedCurve::Secp256r1).unwrap();
        let strict = EcdsaConfig::new().with_low_s(true);
        let mut rng = seeded_rng(seed);
        let keys = generate_keypair(&curve, &mut rng).unwrap();
        let digest = HashAlgorithm::Sha256.digest(&seed.to_be_bytes());
        let sig = sign_with_config(&curve, &strict, keys.signing_key(), &digest, &mut rng).unwrap();
        prop_assert!(sig.is_low_s(&curve));

        let scalars = curve.scalars();
        let s = scalars.from_bytes(sig.s()).unwrap();
        let high = Signature::new(sig.r().to_vec(), scalars.to_bytes(&scalars.negate(&s))).unwrap();

        prop_assert!(verify(&curve, keys.verifying_key(), &digest, &high).unwrap());
        prop_assert!(!verify_with_config(&curve, &strict, keys.verifying_key(), &digest, &high).unwrap());
    }

    #[test]
    fn der_parser_never_panics(
        bytes in prop::collection::vec(any::<u8>(), 0..80)
    ) {
        let curve = CurveParams::named(NamedCurve::Secp256r1).unwrap();
        if let Ok(sig) = Signature::from_der(&curve, &bytes) {
            prop_assert_eq!(sig.to_der(), bytes);
        }
    }
}

//! Integration tests for ECDSA through the facade crate

use ecsign::prelude::*;
use rand::rngs::OsRng;
use ecsign_tests::{scenario_digest, seeded_rng};

#[test]
fn test_every_named_curve() {
    let mut rng = seeded_rng(2024);

    for named in NamedCurve::ALL {
        let curve = CurveParams::named(named).unwrap();
        let keys = generate_keypair(&curve, &mut rng).unwrap();
        let digest = HashAlgorithm::Sha256.digest(named.name().as_bytes());

        let sig = sign(&curve, keys.signing_key(), &digest, &mut rng).unwrap();
        assert_eq!(sig.to_bytes().len(), 2 * curve.scalar_size());
        assert!(verify(&curve, keys.verifying_key(), &digest, &sig).unwrap());

        // Verification is a pure function of its inputs
        for _ in 0..3 {
            assert!(verify(&curve, keys.verifying_key(), &digest, &sig).unwrap());
        }

        let other = HashAlgorithm::Sha256.digest(b"something else");
        assert!(!verify(&curve, keys.verifying_key(), &other, &sig).unwrap());
    }
}

#[test]
fn test_secp192k1_scenario() {
    let curve: CurveParams = CurveParams::named("secp192k1".parse().unwrap()).unwrap();
    let digest = scenario_digest();

    let sig = sign_raw(&curve, &[5], &digest, &mut OsRng).unwrap();
    let signing_key = SigningKey::from_bytes(&curve, &[5]).unwrap();
    let verifying_key = derive_public_key(&curve, &signing_key);
    assert!(verify(&curve, &verifying_key, &digest, &sig).unwrap());

    let mut altered = digest;
    altered[0] = 0x02;
    assert!(!verify(&curve, &verifying_key, &altered, &sig).unwrap());
}

#[test]
fn test_zero_key_and_zero_r() {
    let curve = CurveParams::named(NamedCurve::Secp192k1).unwrap();
    let digest = scenario_digest();

    let err = sign_raw(&curve, &[0], &digest, &mut OsRng).unwrap_err();
    assert!(matches!(err, Error::InvalidScalar { .. }));

    let keys = generate_keypair(&curve, &mut OsRng).unwrap();
    let sig = sign(&curve, keys.signing_key(), &digest, &mut OsRng).unwrap();
    let zero_r = Signature::new(vec![0; 24], sig.s().to_vec()).unwrap();
    assert!(!verify(&curve, keys.verifying_key(), &digest, &zero_r).unwrap());
}

#[test]
fn test_encodings_through_facade() {
    let curve = CurveParams::named(NamedCurve::Secp256r1).unwrap();
    let mut rng = seeded_rng(7);
    let keys = generate_keypair(&curve, &mut rng).unwrap();
    let digest = HashAlgorithm::Sha256.digest(b"wire formats");
    let sig = sign(&curve, keys.signing_key(), &digest, &mut rng).unwrap();

    // Ship the public key compressed and the signature as DER
    let pk_bytes = keys.verifying_key().to_sec1_bytes(&curve, true);
    let der = sig.to_der();

    let pk = VerifyingKey::from_sec1_bytes(&curve, &pk_bytes).unwrap();
    let parsed = Signature::from_der(&curve, &der).unwrap();
    assert!(verify(&curve, &pk, &digest, &parsed).unwrap());
    assert_eq!(
        curve.detect_format(&pk_bytes).unwrap(),
        PointFormat::Compressed
    );

    let sk_bytes = keys.signing_key().to_bytes(&curve);
    let restored = SigningKey::from_bytes(&curve, &sk_bytes).unwrap();
    assert_eq!(&derive_public_key(&curve, &restored), keys.verifying_key());
}

#[test]
fn test_validate_public_key_rejections() {
    let curve = CurveParams::named(NamedCurve::Secp256k1).unwrap();
    let keys = generate_keypair(&curve, &mut OsRng).unwrap();
    assert!(validate_public_key(&curve, keys.verifying_key().as_point()));
    assert!(!validate_public_key(&curve, &AffinePoint::identity()));

    let p192 = CurveParams::named(NamedCurve::Secp192r1).unwrap();
    assert!(!validate_public_key(&curve, p192.generator()));
}

#[test]
fn test_custom_curve_definition() {
    // secp192k1 passed in as an explicit definition
    let definition = CurveDefinition {
        name: "custom-k192",
        p: &hex::decode("fffffffffffffffffffffffffffffffffffffffeffffee37").unwrap(),
        a: &[0x00],
        b: &[0x03],
        g_x: &hex::decode("db4ff10ec057e9ae26b07d0280b7f4341da5d1b1eae06c7d").unwrap(),
        g_y: &hex::decode("9b2f2f6d9c5628a7844163d015be86344082aa88d95e2f9d").unwrap(),
        n: &hex::decode("fffffffffffffffffffffffe26f2fc170f69466a74defd8d").unwrap(),
        h: 1,
    };
    let custom = CurveParams::new(&definition).unwrap();
    let named = CurveParams::named(NamedCurve::Secp192k1).unwrap();

    let signing_key = SigningKey::from_bytes(&custom, &[5]).unwrap();
    let digest = scenario_digest();
    let sig = sign(&custom, &signing_key, &digest, &mut OsRng).unwrap();

    // Same domain parameters, so signatures interoperate
    let vk = derive_public_key(&named, &signing_key);
    assert!(verify(&named, &vk, &digest, &sig).unwrap());
    assert_eq!(custom.name(), "custom-k192");
}

#[test]
fn test_signature_scheme_engine() {
    fn roundtrip<S: SignatureScheme>(scheme: &S, digest: &[u8]) -> bool
    where
        S::KeyPair: AsRef<S::SecretKey>,
    {
        let keys = scheme.keypair(&mut OsRng).unwrap();
        let sig = scheme.sign_digest(digest, keys.as_ref(), &mut OsRng).unwrap();
        scheme
            .verify_digest(digest, &sig, &S::public_key(&keys))
            .unwrap()
    }

    let config = EcdsaConfig::new()
        .with_hash(HashAlgorithm::Sha384)
        .with_low_s(true);
    let engine = Ecdsa::new(CurveParams::named(NamedCurve::Secp256k1).unwrap(), config).unwrap();
    assert_eq!(engine.name(), "ECDSA-secp256k1-SHA-384");

    let digest = HashAlgorithm::Sha384.digest(b"generic");
    assert!(roundtrip(&engine, &digest));
}

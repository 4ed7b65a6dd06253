//! Curve, field and scalar tests against independently computed vectors

use super::*;
use crate::error::Error;
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn curve(named: NamedCurve) -> CurveParams {
    CurveParams::named(named).expect("built-in curve must validate")
}

fn point(curve: &CurveParams, x: &str, y: &str) -> AffinePoint {
    curve
        .point_from_coordinates(&hex::decode(x).unwrap(), &hex::decode(y).unwrap())
        .unwrap()
}

fn coords_hex(curve: &CurveParams, p: &AffinePoint) -> (String, String) {
    let (x, y) = curve.coordinates(p).unwrap();
    (hex::encode(x), hex::encode(y))
}

/// y² = x³ + 2x + 2 over 𝔽₁₀₃₁, prime order 971, G = (1, 818)
const TOY: CurveDefinition<'static> = CurveDefinition {
    name: "toy1031",
    p: &[0x04, 0x07],
    a: &[0x00, 0x02],
    b: &[0x00, 0x02],
    g_x: &[0x00, 0x01],
    g_y: &[0x03, 0x32],
    n: &[0x03, 0xCB],
    h: 1,
};

/// y² = x³ + x + 1 over 𝔽₁₀₁₉, 1052 points, subgroup of order 263
const TOY_COFACTOR: CurveDefinition<'static> = CurveDefinition {
    name: "toy1019",
    p: &[0x03, 0xFB],
    a: &[0x00, 0x01],
    b: &[0x00, 0x01],
    g_x: &[0x00, 0x7B],
    g_y: &[0x02, 0x04],
    n: &[0x01, 0x07],
    h: 4,
};

#[test]
fn test_named_curves_validate() {
    for named in NamedCurve::ALL {
        let c = curve(named);
        assert_eq!(c.name(), named.name());
        assert!(c.is_on_curve(c.generator()));
        assert!(c.is_in_subgroup(c.generator()));
        assert_eq!(c.cofactor(), 1);
    }
    assert_eq!(curve(NamedCurve::Secp192k1).field_size(), 24);
    assert_eq!(curve(NamedCurve::Secp256r1).scalar_size(), 32);
}

#[test]
fn test_named_curve_parsing() {
    assert_eq!("secp192k1".parse::<NamedCurve>().unwrap(), NamedCurve::Secp192k1);
    assert_eq!("P-256".parse::<NamedCurve>().unwrap(), NamedCurve::Secp256r1);
    assert_eq!("prime192v1".parse::<NamedCurve>().unwrap(), NamedCurve::Secp192r1);
    assert_eq!("SECP256K1".parse::<NamedCurve>().unwrap(), NamedCurve::Secp256k1);
    assert!(matches!(
        "curve25519".parse::<NamedCurve>(),
        Err(Error::Parameter { .. })
    ));
    assert_eq!(NamedCurve::default(), NamedCurve::Secp256r1);
    assert_eq!(NamedCurve::Secp256k1.to_string(), "secp256k1");
}

#[test]
fn test_secp256k1_small_multiples() {
    let c = curve(NamedCurve::Secp256k1);
    let g = *c.generator();

    let two_g = c.point_double(&g);
    assert_eq!(
        coords_hex(&c, &two_g),
        (
            "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5".to_string(),
            "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a".to_string()
        )
    );

    let three_g = c.point_add(&two_g, &g);
    assert_eq!(
        coords_hex(&c, &three_g),
        (
            "f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9".to_string(),
            "388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672".to_string()
        )
    );

    assert_eq!(c.mul_generator(&c.scalars().from_u64(2)), two_g);
    assert_eq!(c.mul_generator(&c.scalars().from_u64(3)), three_g);
}

#[test]
fn test_scalar_mul_known_answers() {
    let cases = [
        (
            NamedCurve::Secp192k1,
            "3cd61e370d02ca0687c0b5f7ebf6d0373f4dd0ccccb7cc2d",
            "2c4befd9b02f301eb4014504f0533aa7eb19e9ea56441f78",
        ),
        (
            NamedCurve::Secp192r1,
            "10bb8e9840049b183e078d9c300e1605590118ebdd7ff590",
            "31361008476f917badc9f836e62762be312b72543cceaea1",
        ),
        (
            NamedCurve::Secp256k1,
            "2f8bde4d1a07209355b4a7250a5c5128e88b84bddc619ab7cba8d569b240efe4",
            "d8ac222636e5e3d6d4dba9dda6c9c426f788271bab0d6840dca87d3aa6ac62d6",
        ),
        (
            NamedCurve::Secp256r1,
            "51590b7a515140d2d784c85608668fdfef8c82fd1f5be52421554a0dc3d033ed",
            "e0c17da8904a727d8ae1bf36bf8a79260d012f00d4d80888d1d0bb44fda16da4",
        ),
    ];
    for (named, x, y) in cases {
        let c = curve(named);
        let five_g = c.mul_generator(&c.scalars().from_u64(5));
        assert_eq!(five_g, point(&c, x, y), "5G on {}", named);
    }
}

#[test]
fn test_p256_doubling_matches_addition() {
    let c = curve(NamedCurve::Secp256r1);
    let g = *c.generator();
    let expected = point(
        &c,
        "7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978",
        "07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1",
    );
    assert_eq!(c.point_double(&g), expected);
    assert_eq!(c.point_add(&g, &g), expected);
}

#[test]
fn test_identity_laws() {
    let c = curve(NamedCurve::Secp256r1);
    let g = *c.generator();
    let inf = AffinePoint::identity();

    assert_eq!(c.point_add(&g, &inf), g);
    assert_eq!(c.point_add(&inf, &g), g);
    assert!(c.point_add(&inf, &inf).is_identity());
    assert!(c.point_double(&inf).is_identity());

    let neg_g = c.negate_point(&g);
    assert!(c.is_on_curve(&neg_g));
    assert!(c.point_add(&g, &neg_g).is_identity());
    assert!(c.negate_point(&inf).is_identity());

    assert!(c.mul_generator(&c.scalars().zero()).is_identity());
    assert!(c.scalar_mul(&c.scalars().from_u64(7), &inf).is_identity());
}

#[test]
fn test_scalar_mul_bytes_reduces_mod_n() {
    let c = curve(NamedCurve::Secp256k1);
    let g = *c.generator();
    let n = c.order_bytes();
    assert!(c.scalar_mul_bytes(&n, &g).is_identity());

    // n + 2 as a 33-byte integer
    let mut wide = vec![0u8];
    wide.extend_from_slice(&n);
    let last = wide.len() - 1;
    wide[last] += 2;
    assert_eq!(c.scalar_mul_bytes(&wide, &g), c.point_double(&g));

    assert!(c.scalar_mul_bytes(&[], &g).is_identity());
}

#[test]
fn test_scalar_mul_distributes() {
    let c = curve(NamedCurve::Secp192k1);
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let g = *c.generator();
    for _ in 0..4 {
        let a = c.scalars().random_nonzero(&mut rng).unwrap();
        let b = c.scalars().random_nonzero(&mut rng).unwrap();
        let sum = c.scalars().add(a.as_scalar(), b.as_scalar());
        let lhs = c.mul_generator(&sum);
        let rhs = c.point_add(&c.mul_generator(a.as_scalar()), &c.mul_generator(b.as_scalar()));
        assert_eq!(lhs, rhs);

        let ab = c.scalars().mul(a.as_scalar(), b.as_scalar());
        let nested = c.scalar_mul(b.as_scalar(), &c.scalar_mul(a.as_scalar(), &g));
        assert_eq!(c.mul_generator(&ab), nested);
    }
}

#[test]
fn test_sec1_encodings() {
    let c = curve(NamedCurve::Secp256r1);
    let q = c.mul_generator(&c.scalars().from_u64(3));

    let uncompressed = c.serialize_uncompressed(&q);
    assert_eq!(uncompressed.len(), 65);
    assert_eq!(uncompressed[0], 0x04);
    assert_eq!(c.detect_format(&uncompressed).unwrap(), PointFormat::Uncompressed);
    assert_eq!(c.deserialize_point(&uncompressed).unwrap(), q);

    let compressed = c.serialize_compressed(&q);
    assert_eq!(compressed.len(), 33);
    assert_eq!(c.detect_format(&compressed).unwrap(), PointFormat::Compressed);
    assert_eq!(c.deserialize_point(&compressed).unwrap(), q);

    // Generator y parity: odd on P-256, even on secp256k1
    assert_eq!(c.serialize_compressed(c.generator())[0], 0x03);
    let k1 = curve(NamedCurve::Secp256k1);
    assert_eq!(k1.serialize_compressed(k1.generator())[0], 0x02);

    let identity = c.serialize_uncompressed(&AffinePoint::identity());
    assert!(identity.iter().all(|&b| b == 0));
    assert!(c.deserialize_point(&identity).unwrap().is_identity());
}

#[test]
fn test_sec1_rejections() {
    let c = curve(NamedCurve::Secp256r1);
    let g = *c.generator();

    let mut off_curve = c.serialize_uncompressed(&g);
    off_curve[64] ^= 1;
    assert!(matches!(
        c.deserialize_point(&off_curve),
        Err(Error::InvalidPoint { .. })
    ));

    let mut bad_prefix = c.serialize_uncompressed(&g);
    bad_prefix[0] = 0x05;
    assert!(c.deserialize_point(&bad_prefix).is_err());

    assert!(c.deserialize_point(&[]).is_err());
    assert!(c.deserialize_point(&c.serialize_uncompressed(&g)[..64]).is_err());

    // x = p is out of range
    let mut too_big = vec![0x02];
    too_big.extend_from_slice(&c.field().modulus_bytes());
    assert!(matches!(
        c.deserialize_point(&too_big),
        Err(Error::InvalidPoint { .. })
    ));
}

#[test]
fn test_compressed_point_with_no_root() {
    let c = curve(NamedCurve::Secp256k1);
    // 5³ + 7 = 132 is a non-residue mod p
    let fp = c.field();
    assert!(fp.sqrt(&c.rhs(&fp.from_u32(5))).unwrap().is_none());

    let mut enc = vec![0u8; 33];
    enc[0] = 0x02;
    enc[32] = 5;
    assert!(matches!(
        c.deserialize_point(&enc),
        Err(Error::InvalidPoint { .. })
    ));
}

#[test]
fn test_cross_curve_point_is_rejected() {
    let k1 = curve(NamedCurve::Secp256k1);
    let r1 = curve(NamedCurve::Secp256r1);
    assert!(!r1.is_on_curve(k1.generator()));
    assert!(!k1.is_on_curve(r1.generator()));
}

#[test]
fn test_x_to_scalar() {
    let c = curve(NamedCurve::Secp256r1);
    let g = *c.generator();
    let (x, _) = c.coordinates(&g).unwrap();
    let r = c.x_to_scalar(&g).unwrap();
    assert_eq!(c.scalars().to_bytes(&r), x);
    assert!(c.x_to_scalar(&AffinePoint::identity()).is_none());
}

#[test]
fn test_field_arithmetic() {
    let c = curve(NamedCurve::Secp192k1);
    let fp = c.field();
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let k = c.scalars().random_nonzero(&mut rng).unwrap();
    let q = c.mul_generator(k.as_scalar());
    let (x_bytes, _) = c.coordinates(&q).unwrap();
    let x = fp.from_bytes(&x_bytes).unwrap();

    let inv = fp.invert(&x).unwrap();
    assert_eq!(fp.mul(&x, &inv), fp.one());
    assert_eq!(fp.add(&x, &fp.negate(&x)), fp.zero());
    assert_eq!(fp.sub(&fp.zero(), &x), fp.negate(&x));
    assert_eq!(fp.square(&x), fp.mul(&x, &x));
    assert_eq!(fp.to_bytes(&x), x_bytes);

    assert_eq!(
        fp.invert(&fp.zero()).unwrap_err(),
        Error::NotInvertible {
            context: "field element"
        }
    );

    let sq = fp.square(&x);
    let root = fp.sqrt(&sq).unwrap().unwrap();
    assert!(root == x || root == fp.negate(&x));

    assert!(fp.from_bytes(&fp.modulus_bytes()).is_err());
    assert_eq!(fp.from_u32(3), fp.add(&fp.one(), &fp.add(&fp.one(), &fp.one())));
}

#[test]
fn test_sqrt_needs_three_mod_four() {
    let fp = PrimeField::new(&[13]).unwrap();
    assert!(matches!(fp.sqrt(&fp.one()), Err(Error::Parameter { .. })));

    assert!(PrimeField::new(&[15]).is_err());
    assert!(PrimeField::new(&[16]).is_err());
    assert!(PrimeField::new(&[0u8; 33]).is_err());
}

#[test]
fn test_scalar_ranges() {
    let c = curve(NamedCurve::Secp256k1);
    let zq = c.scalars();
    let n = c.order_bytes();

    assert!(matches!(zq.from_bytes(&n), Err(Error::InvalidScalar { .. })));
    assert!(matches!(
        zq.from_bytes_nonzero(&[0u8; 32]),
        Err(Error::InvalidScalar { .. })
    ));
    assert!(zq.from_bytes_nonzero(&[1u8]).is_ok());

    let n_minus_one = zq.negate(&zq.one());
    assert!(zq.is_high(&n_minus_one));
    assert!(!zq.is_high(&zq.one()));
    assert!(zq.contains(&n_minus_one));

    let inv = zq.invert(&n_minus_one).unwrap();
    assert_eq!(zq.mul(&inv, &n_minus_one), zq.one());
    assert!(matches!(
        zq.invert(&zq.zero()),
        Err(Error::NotInvertible { .. })
    ));
}

#[test]
fn test_digest_reduction() {
    let c = curve(NamedCurve::Secp192k1);
    let zq = c.scalars();
    let digest: Vec<u8> = (1..=32).collect();

    // Truncation keeps the leftmost 192 bits
    let truncated = zq.reduce_digest(&digest);
    assert_eq!(zq.to_bytes(&truncated), digest[..24].to_vec());

    // Wide reduction depends on every byte
    let mut tweaked = digest.clone();
    tweaked[31] ^= 1;
    assert_ne!(zq.reduce_bytes(&digest), zq.reduce_bytes(&tweaked));
    assert_eq!(zq.reduce_digest(&digest), zq.reduce_digest(&tweaked));

    // Digest of all ones exceeds n and is reduced once
    let ones = [0xFFu8; 24];
    let reduced = zq.reduce_digest(&ones);
    assert!(zq.contains(&reduced));
    assert!(zq.nonzero_from_bits(&ones).is_none());
    assert!(zq.nonzero_from_bits(&[0u8; 24]).is_none());
    assert!(zq.nonzero_from_bits(&digest[..24]).is_some());
}

#[test]
fn test_random_nonzero_in_range() {
    let c = curve(NamedCurve::Secp192r1);
    let mut rng = OsRng;
    for _ in 0..16 {
        let k = c.scalars().random_nonzero(&mut rng).unwrap();
        assert!(!k.as_scalar().is_zero());
        assert!(c.scalars().contains(k.as_scalar()));
    }
}

#[test]
fn test_scalar_debug_is_redacted() {
    let c = curve(NamedCurve::Secp256r1);
    let k = c.scalars().from_u64(42);
    assert_eq!(format!("{:?}", k), "Scalar([REDACTED])");
}

#[test]
fn test_toy_curve_arithmetic() {
    let c = CurveParams::new(&TOY).unwrap();
    assert_eq!(c.field_size(), 2);
    let seven_g = c.mul_generator(&c.scalars().from_u64(7));
    assert_eq!(seven_g, point(&c, "0377", "009f"));
    let last = c.mul_generator(&c.scalars().from_u64(970));
    assert_eq!(last, point(&c, "0001", "00d5"));
    assert_eq!(last, c.negate_point(c.generator()));
}

#[test]
fn test_cofactor_curve_subgroup_check() {
    let c = CurveParams::new(&TOY_COFACTOR).unwrap();
    assert_eq!(c.cofactor(), 4);
    let outside = point(&c, "0000", "0001");
    assert!(c.is_on_curve(&outside));
    assert!(!c.is_in_subgroup(&outside));
    assert!(c.is_in_subgroup(c.generator()));
}

#[test]
fn test_invalid_definitions_rejected() {
    let composite_p = CurveDefinition {
        p: &[0x04, 0x03],
        ..TOY
    };
    assert!(matches!(
        CurveParams::new(&composite_p),
        Err(Error::Parameter { .. })
    ));

    let wrong_order = CurveDefinition {
        n: &[0x03, 0xC7],
        ..TOY
    };
    assert!(CurveParams::new(&wrong_order).is_err());

    let off_curve = CurveDefinition {
        g_y: &[0x03, 0x33],
        ..TOY
    };
    assert!(CurveParams::new(&off_curve).is_err());

    let singular = CurveDefinition {
        a: &[0x00],
        b: &[0x00],
        ..TOY
    };
    assert!(CurveParams::new(&singular).is_err());

    let coefficient_too_big = CurveDefinition {
        a: &[0x04, 0x07],
        ..TOY
    };
    assert!(CurveParams::new(&coefficient_too_big).is_err());

    let zero_cofactor = CurveDefinition { h: 0, ..TOY };
    assert!(CurveParams::new(&zero_cofactor).is_err());
}

#[test]
fn test_curve_params_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CurveParams>();
    assert_send_sync::<AffinePoint>();
}

//! ECDSA walkthrough
//!
//! Usage: `cargo run --example ecdsa_demo -- [curve] [hex-digest]`
//!
//! Defaults to secp192k1 and the SHA-256 digest of a fixed message. Set
//! `RUST_LOG=debug` to see the library's own log output.

use ecsign::prelude::*;
use rand::rngs::OsRng;
use std::process::ExitCode;

const DEFAULT_MESSAGE: &[u8] = b"This is a test message that will be signed with ECDSA";

fn run() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let named: NamedCurve = match args.next() {
        Some(name) => name.parse()?,
        None => NamedCurve::Secp192k1,
    };
    let digest = match args.next() {
        Some(digest_hex) => hex::decode(digest_hex)?,
        None => HashAlgorithm::Sha256.digest(DEFAULT_MESSAGE),
    };

    println!("ECDSA Signature Example");
    println!("=======================");

    let curve = CurveParams::named(named)?;
    log::info!("curve {} ({} bits)", curve, 8 * curve.scalar_size());

    let hash = match digest.len() {
        28 => HashAlgorithm::Sha224,
        32 => HashAlgorithm::Sha256,
        48 => HashAlgorithm::Sha384,
        64 => HashAlgorithm::Sha512,
        other => return Err(format!("unsupported digest length {}", other).into()),
    };
    let config = EcdsaConfig::new().with_hash(hash);
    log::info!("digest {} ({})", hex::encode(&digest), hash);

    let mut rng = OsRng;
    let keys = generate_keypair(&curve, &mut rng)?;
    println!(
        "Public key: {}",
        hex::encode(keys.verifying_key().to_sec1_bytes(&curve, true))
    );

    let signature = sign_with_config(&curve, &config, keys.signing_key(), &digest, &mut rng)?;
    println!("Signature (DER): {}", hex::encode(signature.to_der()));

    if !verify_with_config(&curve, &config, keys.verifying_key(), &digest, &signature)? {
        return Err("signature did not verify".into());
    }
    println!("Signature verified! ✓");

    let mut altered = digest.clone();
    altered[0] ^= 0x01;
    if verify_with_config(&curve, &config, keys.verifying_key(), &altered, &signature)? {
        return Err("signature verified against an altered digest".into());
    }
    println!("Altered digest correctly rejected ✓");

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("demo failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

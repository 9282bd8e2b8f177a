//! Benchmarks for ECDSA key generation, signing and verification.
//!
//! Each curve is measured with random and deterministic nonces so the cost of
//! the HMAC-DRBG can be read off against plain rejection sampling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sigil_sign::{
    DigestAlgorithm, EcPrivateKey, EcdsaSigner, NamedCurve, NonceKind, SignerConfig,
};

const CURVES: &[NamedCurve] = &[NamedCurve::P256, NamedCurve::P384, NamedCurve::Secp256k1];

const MESSAGE: &[u8] = b"benchmark message for ECDSA signing";

fn bench_keypair(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa_keypair");
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    for &curve in CURVES {
        group.bench_function(curve.name(), |b| {
            b.iter(|| black_box(EcPrivateKey::generate(curve, &mut rng).public_key()));
        });
    }

    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa_sign");
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    for &curve in CURVES {
        let key = EcPrivateKey::generate(curve, &mut rng);
        for nonce in [NonceKind::Random, NonceKind::Deterministic] {
            let config = SignerConfig::new(curve, DigestAlgorithm::Sha256).with_nonce(nonce);
            let signer = EcdsaSigner::new(config);

            group.bench_with_input(
                BenchmarkId::new(curve.name(), format!("{:?}", nonce)),
                &key,
                |b, key| {
                    b.iter(|| {
                        black_box(
                            signer
                                .sign_with_rng(key, black_box(MESSAGE), &mut rng)
                                .unwrap(),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa_verify");
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    for &curve in CURVES {
        let signer = EcdsaSigner::new(SignerConfig::new(curve, DigestAlgorithm::Sha256));
        let key = EcPrivateKey::generate(curve, &mut rng);
        let public = key.public_key();
        let signature = signer.sign_with_rng(&key, MESSAGE, &mut rng).unwrap();

        group.bench_function(curve.name(), |b| {
            b.iter(|| {
                black_box(
                    signer
                        .verify(&public, black_box(MESSAGE), black_box(&signature))
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_keypair, bench_sign, bench_verify);
criterion_main!(benches);

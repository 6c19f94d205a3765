//! # DHCPv6 Authentication Benchmarks
//!
//! Per-message cost of the authentication paths:
//!
//! | Path | Operation | Work per message |
//! |------|-----------|------------------|
//! | Digest | MD5 | One pass over the payload |
//! | Delayed authentication | HMAC-MD5 compute / verify | Two MD5 passes |
//! | Secure DHCPv6 | RSA-1024 sign / verify | SHA-256 plus one private or public key operation |
//! | Anti-replay | Timestamp check | Registry lookup under a write lock |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dhcp6_auth::test_utils::{
    test_rsa_key_pair, FixedTimeSource, MemoryKeySource, StubCryptoProvider,
};
use dhcp6_auth::{
    compute_mac, verify_mac, AuthAlgorithm, AuthService, AuthenticationApi, Duid, HashAlgorithm,
    RsaProvider, SignatureAlgorithm, SymmetricKey, TimeSource, Timestamp, MAC_LENGTH,
};
use dhcp6_digest::{hmac_md5, Md5};
use rand::Rng;

const MESSAGE_SIZES: [usize; 4] = [64, 256, 1024, 4096];

fn random_message(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

// ============================================================================
// Digest
// ============================================================================

fn bench_md5(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest-md5");

    for size in MESSAGE_SIZES {
        let data = random_message(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("md5", size), &data, |b, data| {
            b.iter(|| black_box(Md5::digest(black_box(data))))
        });
        group.bench_with_input(BenchmarkId::new("hmac_md5", size), &data, |b, data| {
            b.iter(|| black_box(hmac_md5(b"benchmark key", black_box(data))))
        });
    }

    group.finish();
}

// ============================================================================
// Delayed authentication
// ============================================================================

fn bench_delayed_authentication(c: &mut Criterion) {
    let mut group = c.benchmark_group("delayed-authentication");
    let key = SymmetricKey::new("bench", "example.net", 1, b"0123456789abcdef".to_vec(), 0);

    for size in MESSAGE_SIZES {
        let mut message = random_message(size);
        let mac_offset = size - MAC_LENGTH;

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(BenchmarkId::new("compute_mac", size), |b| {
            b.iter(|| {
                compute_mac(&mut message, AuthAlgorithm::HmacMd5, mac_offset, &key)
                    .map(|()| black_box(message[mac_offset]))
            })
        });

        group.bench_function(BenchmarkId::new("verify_mac", size), |b| {
            b.iter(|| {
                black_box(verify_mac(&message, AuthAlgorithm::HmacMd5, mac_offset, &key).is_ok())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Secure DHCPv6
// ============================================================================

fn bench_secure_dhcpv6(c: &mut Criterion) {
    let mut group = c.benchmark_group("secure-dhcpv6");
    group.measurement_time(Duration::from_secs(10));

    let pair = test_rsa_key_pair();
    let source = MemoryKeySource::new()
        .with("bench.key", pair.private_pem.clone())
        .with("bench.pub", pair.public_pem.clone());
    let mut service = AuthService::new(
        RsaProvider::new(),
        source,
        Arc::new(FixedTimeSource::from_secs(1_700_000_000)),
    );
    if let Err(e) = service
        .load_private_key("bench.key")
        .and_then(|()| service.load_public_key("bench.pub"))
    {
        panic!("loading benchmark keys: {e}");
    }
    let public_key = service.local_public_key().map(<[u8]>::to_vec).unwrap_or_default();

    let sig_len = service.signature_size();
    let mut message = random_message(512 + sig_len);
    let sig_offset = 512;

    group.bench_function("sign_message", |b| {
        b.iter(|| {
            service
                .sign_message(
                    &mut message,
                    sig_offset,
                    HashAlgorithm::Sha256,
                    SignatureAlgorithm::RsassaPkcs1V15,
                )
                .is_ok()
        })
    });

    group.bench_function("verify_message", |b| {
        b.iter(|| {
            black_box(
                service
                    .verify_message(
                        &message,
                        sig_offset,
                        sig_len,
                        HashAlgorithm::Sha256,
                        SignatureAlgorithm::RsassaPkcs1V15,
                        &public_key,
                    )
                    .is_ok(),
            )
        })
    });

    group.finish();
}

// ============================================================================
// Anti-replay
// ============================================================================

fn bench_anti_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("anti-replay");

    for peers in [1usize, 100, 1000] {
        let clock = Arc::new(FixedTimeSource::from_secs(1_700_000_000));
        let service = AuthService::new(
            StubCryptoProvider::new(),
            MemoryKeySource::new(),
            Arc::clone(&clock),
        );
        let duids: Vec<Duid> = (0..peers as u32)
            .map(|i| Duid::new(i.to_be_bytes().to_vec()))
            .collect();
        for duid in &duids {
            let start = Timestamp::from_secs_micros(1_700_000_000, 0);
            let _ = service.authenticate_peer(duid, b"key", start);
        }
        let last = duids[peers - 1].clone();

        group.bench_with_input(BenchmarkId::new("authenticate_peer", peers), &last, |b, duid| {
            b.iter(|| {
                clock.advance_micros(1_000);
                let stamp = clock.now().unwrap_or_default();
                black_box(service.authenticate_peer(duid, b"key", stamp).unwrap_or(false))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_md5,
    bench_delayed_authentication,
    bench_secure_dhcpv6,
    bench_anti_replay,
);
criterion_main!(benches);

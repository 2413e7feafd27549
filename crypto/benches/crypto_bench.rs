use cos_types::ChainId;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn ed25519_sign_bench(c: &mut Criterion) {
    let kp = cos_crypto::generate_keypair();
    let msg = [42u8; 128];

    c.bench_function("ed25519_sign_128B", |b| {
        b.iter(|| cos_crypto::sign_message(black_box(&msg), &kp.private))
    });
}

fn chain_sign_bench(c: &mut Criterion) {
    let kp = cos_crypto::generate_keypair();
    let trx = vec![0x5Au8; 512];

    c.bench_function("sign_for_chain_512B", |b| {
        b.iter(|| cos_crypto::sign_for_chain(black_box(&trx), ChainId::Main, &kp.private))
    });
}

fn chain_verify_bench(c: &mut Criterion) {
    let kp = cos_crypto::generate_keypair();
    let trx = vec![0x5Au8; 512];
    let sig = cos_crypto::sign_for_chain(&trx, ChainId::Main, &kp.private);

    c.bench_function("verify_for_chain_512B", |b| {
        b.iter(|| cos_crypto::verify_for_chain(black_box(&trx), ChainId::Main, &sig, &kp.public))
    });
}

fn blake2b_256_1kb_bench(c: &mut Criterion) {
    let data = vec![0xCDu8; 1024];

    c.bench_function("blake2b_256_1KB", |b| {
        b.iter(|| cos_crypto::blake2b_256(black_box(&data)))
    });
}

fn crc32_content_bench(c: &mut Criterion) {
    let seed = b"alice1a reasonably long post title for hashing";

    c.bench_function("crc32_content_48B", |b| {
        b.iter(|| cos_crypto::crc32_content(black_box(seed)))
    });
}

criterion_group!(
    benches,
    ed25519_sign_bench,
    chain_sign_bench,
    chain_verify_bench,
    blake2b_256_1kb_bench,
    crc32_content_bench,
);
criterion_main!(benches);

//! Request encoding/decoding benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Instant;
use throttr_protocol::*;
use uuid::Uuid;

const KEY_SIZES: [usize; 3] = [8, 64, 255];
const VALUE_SIZES: [usize; 3] = [16, 256, 4096];

fn key(size: usize) -> Vec<u8> {
    vec![b'k'; size]
}

fn value_sizes() -> impl Iterator<Item = usize> {
    VALUE_SIZES.into_iter().filter(|size| *size <= MAX_VALUE_LEN)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in KEY_SIZES {
        let key = key(size);
        let encoded = encode_insert(100, TtlType::Seconds, 60, &key).unwrap();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &key, |b, key| {
            b.iter(|| black_box(encode_insert(100, TtlType::Seconds, 60, key).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| black_box(decode_insert(encoded).unwrap()));
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for size in KEY_SIZES {
        let key = key(size);
        let encoded = encode_update(AttributeType::Quota, ChangeType::Decrease, 1, &key).unwrap();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &key, |b, key| {
            b.iter(|| {
                let buf = encode_update(AttributeType::Quota, ChangeType::Decrease, 1, key);
                black_box(buf.unwrap())
            });
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| black_box(decode_update(encoded).unwrap()));
        });
    }

    group.finish();
}

fn bench_keyed(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed");

    for size in KEY_SIZES {
        let query = encode_query(key(size)).unwrap();
        let get = encode_get(key(size)).unwrap();

        group.throughput(Throughput::Bytes(query.len() as u64));
        group.bench_with_input(BenchmarkId::new("query", size), &query, |b, encoded| {
            b.iter(|| black_box(decode_query(encoded).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("get", size), &get, |b, encoded| {
            b.iter(|| black_box(decode_get(encoded).unwrap()));
        });
    }

    group.finish();
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");

    for size in value_sizes() {
        let value = vec![0xA5u8; size];
        let encoded = encode_set(TtlType::Seconds, 60, "session", &value).unwrap();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &value, |b, value| {
            b.iter(|| black_box(encode_set(TtlType::Seconds, 60, "session", value).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| black_box(decode_set(encoded).unwrap()));
        });
    }

    group.finish();
}

fn bench_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish");

    for size in value_sizes() {
        let value = vec![0x5Au8; size];
        let encoded = encode_publish("metrics", &value).unwrap();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &value, |b, value| {
            b.iter(|| black_box(encode_publish("metrics", value).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| black_box(decode_publish(encoded).unwrap()));
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let messages = vec![
        encode_insert(100, TtlType::Seconds, 60, "user:42").unwrap(),
        encode_query("user:42").unwrap(),
        encode_connection(Uuid::nil()),
        encode_whoami(),
    ];

    c.bench_function("peek_and_header_size", |b| {
        b.iter(|| {
            for message in &messages {
                let kind = RequestType::peek(black_box(message)).unwrap();
                black_box(kind.header_size());
            }
        });
    });
}

fn bench_entry_update(c: &mut Criterion) {
    let now = Instant::now();
    let decrease = encode_update(AttributeType::Quota, ChangeType::Decrease, 1, "k").unwrap();
    let increase = encode_update(AttributeType::Quota, ChangeType::Increase, 1, "k").unwrap();
    let decrease = decode_update(&decrease).unwrap();
    let increase = decode_update(&increase).unwrap();

    c.bench_function("entry_apply_update", |b| {
        let mut entry = RequestEntry::counter(100, TtlType::Seconds, 60, now);
        b.iter(|| {
            entry.apply_update(black_box(&decrease), now).unwrap();
            entry.apply_update(black_box(&increase), now).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_update,
    bench_keyed,
    bench_set,
    bench_publish,
    bench_dispatch,
    bench_entry_update,
);

criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dnsdot::{dotify, undotify, DnsCodec};

/// Benchmark payload -> dotted labels
fn bench_dotify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dotify");

    for size in [0usize, 16, 64, 150] {
        let payload = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| dotify(black_box(payload)))
        });
    }

    group.finish();
}

/// Benchmark dotted labels -> payload
fn bench_undotify(c: &mut Criterion) {
    let mut group = c.benchmark_group("undotify");

    for size in [16usize, 64, 150] {
        let dotted = dotify(&vec![0x5au8; size]).expect("payload fits");
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dotted, |b, dotted| {
            b.iter(|| undotify(black_box(dotted)))
        });
    }

    group.finish();
}

/// Benchmark the full query name round trip under a base domain
fn bench_codec_round_trip(c: &mut Criterion) {
    let codec = DnsCodec::new("tunnel.example.com");
    let payload = vec![0xc3u8; codec.max_payload_len()];

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("max_payload_round_trip", |b| {
        b.iter(|| {
            let fqdn = codec.encode_query(black_box(&payload)).expect("payload fits");
            codec.decode_query(&fqdn).expect("valid name")
        })
    });
    group.finish();
}

criterion_group!(benches, bench_dotify, bench_undotify, bench_codec_round_trip);
criterion_main!(benches);

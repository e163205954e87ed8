//! Encode/decode throughput benchmarks for HBase records.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hbase_thrift::core::{GenericStruct, TBinaryInputProtocol, TInputProtocol, TType};
use hbase_thrift::{TColumn, TColumnValue, TGet, TPut, TResult, TScan, ThriftValue};

fn sample_put(cells: usize) -> TPut {
    let column_values = (0..cells)
        .map(|i| {
            TColumnValue::new("cf", format!("q{i}"), vec![b'x'; 64]).with_timestamp(i as i64)
        })
        .collect();
    TPut::new("row-000001", column_values)
}

fn sample_result(cells: usize) -> TResult {
    TResult {
        row: Some(Bytes::from_static(b"row-000001")),
        column_values: sample_put(cells).column_values,
    }
}

fn bench_record_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_encoding");

    let get = TGet::new("row-000001")
        .add_column(TColumn::new("cf").with_qualifier("a"))
        .with_max_versions(3);
    group.bench_function("tget_encode", |b| {
        b.iter(|| black_box(&get).to_bytes().unwrap())
    });

    let scan = TScan::new()
        .with_range("a", "z")
        .with_caching(100)
        .with_filter("PrefixFilter('row')");
    group.bench_function("tscan_encode", |b| {
        b.iter(|| black_box(&scan).to_bytes().unwrap())
    });

    for cells in [1usize, 16, 256] {
        let put = sample_put(cells);
        let size = put.to_bytes().unwrap().len();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("tput_encode", cells), &put, |b, put| {
            b.iter(|| black_box(put).to_bytes().unwrap())
        });
    }

    group.finish();
}

fn bench_record_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_decoding");

    for cells in [1usize, 16, 256] {
        let bytes = sample_result(cells).to_bytes().unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("tresult_decode", cells), &bytes, |b, bytes| {
            b.iter(|| TResult::from_bytes(black_box(bytes)).unwrap())
        });
        group.bench_with_input(
            BenchmarkId::new("generic_decode", cells),
            &bytes,
            |b, bytes| b.iter(|| GenericStruct::from_bytes(black_box(bytes)).unwrap()),
        );
    }

    group.finish();
}

fn bench_skip(c: &mut Criterion) {
    let mut group = c.benchmark_group("skip");

    for cells in [16usize, 256] {
        let bytes = sample_result(cells).to_bytes().unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("skip_struct", cells), &bytes, |b, bytes| {
            b.iter(|| {
                let mut input = TBinaryInputProtocol::new(black_box(bytes));
                input.skip(TType::Struct).unwrap();
                black_box(input.remaining())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_record_encoding,
    bench_record_decoding,
    bench_skip
);
criterion_main!(benches);

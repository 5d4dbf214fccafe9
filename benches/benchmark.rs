//! Performance benchmarks for FastVcf
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fast_vcf::formats::{
    parse_records_parallel, CompressedGenotypes, EffectAnnotation, GenotypeTagging, HeaderModel, ParseOptions,
    VcfRecord,
};
use std::sync::Arc;

const LINE: &str = "chr1\t12345\trs123\tA\tG\t30\tPASS\tDP=100;AF=0.5;AC=3;DB\tGT:DP\t0/1:30\t1/1:12\t0/0:40";

fn header() -> Arc<HeaderModel> {
    let mut header = HeaderModel::new();
    header.set_sample_names(&["S1", "S2", "S3"]);
    Arc::new(header)
}

/// Benchmark record parsing without touching INFO or genotypes
fn bench_record_parsing(c: &mut Criterion) {
    let header = header();
    c.bench_function("record_parse", |b| {
        b.iter(|| {
            let record = VcfRecord::parse(black_box(LINE), Arc::clone(&header)).unwrap();
            black_box(record)
        })
    });
}

/// Benchmark first INFO access, which builds the key map
fn bench_info_access(c: &mut Criterion) {
    let header = header();
    c.bench_function("record_parse_and_info", |b| {
        b.iter(|| {
            let record = VcfRecord::parse(black_box(LINE), Arc::clone(&header)).unwrap();
            black_box(record.info_int("DP"))
        })
    });
}

/// Benchmark decomposition for records of growing ALT count
fn bench_decomposition(c: &mut Criterion) {
    let header = Arc::new(HeaderModel::new());
    let lines = [
        "1\t100\t.\tA\tG\t.\t.\t.",
        "1\t100\t.\tACGT\tATCT,A\t.\t.\t.",
        "1\t100\t.\tAGAC\tAAC,AGACT,R,TGAC\t.\t.\t.",
    ];

    let mut group = c.benchmark_group("decomposition");
    for line in lines.iter() {
        let record = VcfRecord::parse(line, Arc::clone(&header)).unwrap();
        let alts = record.alts().len();
        group.bench_with_input(BenchmarkId::from_parameter(alts), &record, |b, record| {
            b.iter(|| black_box(record.variants(GenotypeTagging::Index).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark genotype compression over cohort sizes
fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("genotype_compression");
    for size in [100usize, 10_000].iter() {
        let codes: Vec<i8> = (0..*size).map(|i| [0, 0, 0, 1, 2, -1][i % 6]).collect();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &codes, |b, codes| {
            b.iter(|| {
                let compressed = CompressedGenotypes::compress(black_box(codes)).unwrap();
                black_box(compressed.decompress(codes.len()))
            })
        });
    }
    group.finish();
}

/// Benchmark EFF entry parsing
fn bench_effect_parsing(c: &mut Criterion) {
    let entry = "NON_SYNONYMOUS_CODING(MODERATE|MISSENSE|Gga/Aga|G45R|229|ABC1|protein_coding|CODING|ENST00000001|2|1)";
    c.bench_function("effect_parse", |b| {
        b.iter(|| black_box(EffectAnnotation::parse(black_box(entry)).unwrap()))
    });
}

/// Benchmark batch parsing with one and four threads
fn bench_parallel_parsing(c: &mut Criterion) {
    let header = header();
    let lines: Vec<(usize, String)> = (0..50_000usize)
        .map(|i| (i + 1, LINE.replace("12345", &(i + 1).to_string())))
        .collect();

    let mut group = c.benchmark_group("batch_parsing");
    group.throughput(Throughput::Elements(lines.len() as u64));
    for threads in [1usize, 4].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(threads), threads, |b, &threads| {
            b.iter(|| {
                let result = parse_records_parallel(&lines, Arc::clone(&header), &ParseOptions { threads }).unwrap();
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_record_parsing,
    bench_info_access,
    bench_decomposition,
    bench_compression,
    bench_effect_parsing,
    bench_parallel_parsing,
);

criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use ttop::capture::{SnapshotParser, parse};
use ttop::report::{self, ReportOptions};
use ttop::series::align;

const SAMPLE: &str = include_str!("../tests/fixtures/sample_top.txt");

fn make_capture(repeats: usize) -> Vec<u8> {
    SAMPLE.repeat(repeats).into_bytes()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_100_1000_10000");
    let parser = SnapshotParser::new();

    for repeats in [100usize, 1000, 10_000] {
        let input = make_capture(repeats);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &input, |b, input| {
            b.iter(|| {
                let result = parser.parse(black_box(input)).expect("in-memory read");
                black_box(result);
            })
        });
    }

    group.finish();
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_100_1000_10000");

    for repeats in [100usize, 1000, 10_000] {
        let parsed = parse(&make_capture(repeats)).expect("in-memory read");
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &parsed, |b, parsed| {
            b.iter(|| black_box(align(black_box(parsed))))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_100_1000");
    let options = ReportOptions::default();

    for repeats in [100usize, 1000] {
        let series = align(&parse(&make_capture(repeats)).expect("in-memory read"));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &series, |b, series| {
            b.iter(|| {
                let html = report::render(black_box(series), &options).expect("render");
                black_box(html);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_align, bench_render);
criterion_main!(benches);

//! Benchmarks for the GenBank codec
//!
//! - Parsing: records per second for small and large records
//! - Rendering: the writer's layout pass
//! - Location grammar: deeply joined locations
//!
//! Run with: cargo bench --bench genbank_parsing
//! Run specific: cargo bench --bench genbank_parsing -- parse

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seqmetal::formats::genbank::{self, Feature, GenbankParser, GenbankRecord, Location, Meta};
use std::io::Cursor;

/// Synthetic record with `features` features over `length` bases
fn generate_record(length: usize, features: usize) -> GenbankRecord {
    let mut meta = Meta::default();
    meta.locus.name = format!("BENCH{}", length);
    meta.locus.sequence_length = length as u64;
    meta.locus.molecule_type = "DNA".to_string();
    meta.locus.genbank_division = "SYN".to_string();
    meta.locus.modification_date = "01-JAN-2024".to_string();
    meta.definition = "Synthetic benchmark record with a generated feature table.".to_string();

    let mut record = GenbankRecord::new(meta);
    record.set_sequence(
        (0..length)
            .map(|i| ['a', 'c', 'g', 't'][i % 4])
            .collect::<String>(),
    );

    let span = (length / features.max(1)).max(2);
    for i in 0..features {
        let start = (i * span) % length.saturating_sub(span).max(1);
        let location = if i % 2 == 0 {
            Location::range(start, start + span)
        } else {
            Location::complement(Location::join(vec![
                Location::range(start, start + span / 2),
                Location::range(start + span / 2, start + span),
            ]))
        };
        record.add_feature(
            Feature::new("CDS", location)
                .with_attribute("gene", format!("gene{}", i))
                .with_attribute("note", "generated feature for benchmarking"),
        );
    }
    record
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (length, features) in [(1_000, 10), (50_000, 200), (500_000, 2_000)] {
        let text = genbank::render(&generate_record(length, features));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &text, |b, text| {
            b.iter(|| {
                let mut parser = GenbankParser::new(Cursor::new(black_box(text.as_bytes())));
                parser.next_record().unwrap()
            });
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for (length, features) in [(1_000, 10), (50_000, 200), (500_000, 2_000)] {
        let record = generate_record(length, features);
        group.throughput(Throughput::Elements(length as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &record, |b, record| {
            b.iter(|| genbank::render(black_box(record)));
        });
    }

    group.finish();
}

fn bench_feature_sequences(c: &mut Criterion) {
    let text = genbank::render(&generate_record(50_000, 200));

    c.bench_function("resolve_all_features", |b| {
        b.iter(|| {
            let record = genbank::parse(Cursor::new(text.as_bytes())).unwrap();
            let total: usize = (0..record.features.len())
                .map(|i| record.feature_sequence(i).unwrap().len())
                .sum();
            black_box(total)
        });
    });
}

fn bench_location_grammar(c: &mut Criterion) {
    let mut group = c.benchmark_group("location_parse");

    for parts in [2, 20, 200] {
        let text = format!(
            "complement(join({}))",
            (0..parts)
                .map(|i| format!("{}..{}", i * 10 + 1, i * 10 + 5))
                .collect::<Vec<_>>()
                .join(",")
        );
        group.bench_with_input(BenchmarkId::from_parameter(parts), &text, |b, text| {
            b.iter(|| Location::parse(black_box(text)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_render,
    bench_feature_sequences,
    bench_location_grammar
);
criterion_main!(benches);

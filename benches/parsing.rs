//! Benchmarks for chataudit parsing, classification and queries.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- export_parsing`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chataudit::core::output::to_csv;
use chataudit::core::{FilterSpec, RecordCollection, RuleSet, apply_filters, category_counts};
use chataudit::parser::ExportParser;

// =============================================================================
// Test Data Generators
// =============================================================================

const BODIES: [&str; 6] = [
    "anular factura {}",
    "hay que anular el pedido {}",
    "el monto del recibo {} está mal",
    "error al cargar la matrícula {}",
    "buen día a todos, mensaje {}",
    "descuento aplicado en la orden {}",
];

fn generate_export(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let author = if i % 2 == 0 { "Ana" } else { "Luis" };
        let day = i % 28 + 1;
        let month = i % 12 + 1;
        let body = BODIES[i % BODIES.len()].replace("{}", &i.to_string());
        let line = if i % 3 == 0 {
            format!("[{day:02}/{month:02}/2024 {:02}:{:02}] {author}: {body}", i % 24, i % 60)
        } else {
            format!("{day:02}/{month:02}/2024, {:02}:{:02} - {author}: {body}", i % 24, i % 60)
        };
        lines.push(line);
        if i % 5 == 0 {
            lines.push("continuación del mensaje anterior".to_string());
        }
    }
    lines.join("\n")
}

fn generate_records(count: usize) -> RecordCollection {
    ExportParser::default()
        .parse_str(&generate_export(count))
        .records
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_export_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_parsing");
    let parser = ExportParser::default();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let export = parser.parse_str(black_box(txt));
                black_box(export)
            });
        });
    }
    group.finish();
}

fn bench_parse_bytes_utf16(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bytes_utf16");
    let parser = ExportParser::default();

    for size in [1_000_usize, 10_000] {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in generate_export(size).encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| {
                let export = parser.parse_bytes(black_box(bytes)).unwrap();
                black_box(export)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Classification Benchmarks
// =============================================================================

fn bench_classify(c: &mut Criterion) {
    let rules = RuleSet::default();
    let bodies: Vec<String> = (0..1_000)
        .map(|i| BODIES[i % BODIES.len()].replace("{}", &i.to_string()))
        .collect();

    c.bench_function("classify_1000_bodies", |b| {
        b.iter(|| {
            for body in &bodies {
                black_box(rules.classify(black_box(body)));
            }
        });
    });
}

// =============================================================================
// Query Benchmarks
// =============================================================================

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_filters");
    let spec = FilterSpec::new()
        .with_author("Ana")
        .with_year(2024)
        .with_keyword("monto");

    for size in [1_000_usize, 10_000, 50_000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(apply_filters(black_box(records), &spec)));
        });
    }
    group.finish();
}

fn bench_category_counts(c: &mut Criterion) {
    let records = generate_records(10_000);
    c.bench_function("category_counts_10000", |b| {
        b.iter(|| black_box(category_counts(black_box(&records))));
    });
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_csv");

    for size in [1_000_usize, 10_000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(to_csv(black_box(records)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(parsing_benches, bench_export_parsing, bench_parse_bytes_utf16);
criterion_group!(classification_benches, bench_classify);
criterion_group!(query_benches, bench_filters, bench_category_counts);
criterion_group!(output_benches, bench_output_csv);

criterion_main!(
    parsing_benches,
    classification_benches,
    query_benches,
    output_benches
);

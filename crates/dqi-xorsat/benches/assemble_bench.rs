//! Benchmarks for DQI circuit assembly
//!
//! Run with: cargo bench -p dqi-xorsat

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dqi_xorsat::{CircuitAssembler, CorrectionMode, ParityCheckMatrix, SyndromeTable};

/// Benchmark syndrome table construction
fn bench_table_build(c: &mut Criterion) {
    let matrix = ParityCheckMatrix::default();
    c.bench_function("syndrome_table_build", |b| {
        b.iter(|| SyndromeTable::build(black_box(&matrix)));
    });
}

/// Benchmark full assembly per correction mode
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let matrix = ParityCheckMatrix::default();
    let table = SyndromeTable::build(&matrix);

    for mode in [CorrectionMode::Legacy, CorrectionMode::FullMatch] {
        let assembler = CircuitAssembler::new(&matrix, &table).with_correction(mode);
        group.bench_with_input(BenchmarkId::new("mode", mode), &assembler, |b, a| {
            b.iter(|| black_box(a.assemble().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark depth of the assembled circuit
fn bench_depth(c: &mut Criterion) {
    let matrix = ParityCheckMatrix::default();
    let table = SyndromeTable::build(&matrix);
    let circuit = CircuitAssembler::new(&matrix, &table).assemble().unwrap();

    c.bench_function("assembled_depth", |b| {
        b.iter(|| black_box(circuit.depth()));
    });
}

criterion_group!(benches, bench_table_build, bench_assemble, bench_depth);

criterion_main!(benches);

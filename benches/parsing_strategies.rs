//! Benchmark suite for comparing processing strategies
//!
//! This benchmark compares the performance of synchronous and asynchronous
//! processing strategies using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Benchmark Ledgers
//!
//! Ledgers of 100, 10,000 and 1,000,000 rows are generated into a temporary
//! file before each benchmark. Rows cycle through labels that hit the
//! percentage, threshold, non-deductible and fallback paths of the rule
//! table.

use divan::Bencher;
use fiscal_correction_engine::cli::StrategyType;
use fiscal_correction_engine::strategy::{create_strategy, BatchConfig, ProcessingOptions};
use fiscal_correction_engine::{classify_and_correct, LedgerRow};
use rust_decimal::Decimal;
use std::io::{BufWriter, Write};
use tempfile::NamedTempFile;

const SIZES: &[usize] = &[100, 10_000, 1_000_000];

const LABELS: &[(&str, &str)] = &[
    ("Representatiekosten", "Zakenlunch"),
    ("Autokosten", "Benzine"),
    ("Autokosten", "Elektrische leaseauto"),
    ("Boetes", "Parkeerboete"),
    ("Huisvestingskosten", "Huur kantoor"),
    ("Kosten eigen woning", ""),
    ("Salarissen", "Januari"),
    ("Kantoorbenodigdheden", "Papier"),
];

fn main() {
    divan::main();
}

fn generate_ledger(rows: usize) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    let mut writer = BufWriter::new(file.as_file());

    writeln!(writer, "Grootboekrekening,Specificatie,Bedrag (EUR)").expect("write failed");
    for i in 0..rows {
        let (label, specification) = LABELS[i % LABELS.len()];
        writeln!(writer, "{},{},{}.{:02}", label, specification, 500 + i % 4000, i % 100)
            .expect("write failed");
    }
    writer.flush().expect("flush failed");
    drop(writer);

    file
}

fn bench_strategy(bencher: Bencher, strategy_type: StrategyType, rows: usize) {
    let ledger = generate_ledger(rows);
    let strategy = create_strategy(
        strategy_type,
        ProcessingOptions::default(),
        Some(BatchConfig::default()),
    );

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(ledger.path(), &mut output)
            .expect("Processing failed");
        output
    });
}

/// Benchmark synchronous processing strategy
#[divan::bench(args = SIZES)]
fn sync_strategy(bencher: Bencher, rows: usize) {
    bench_strategy(bencher, StrategyType::Sync, rows);
}

/// Benchmark asynchronous processing strategy
#[divan::bench(args = SIZES)]
fn async_strategy(bencher: Bencher, rows: usize) {
    bench_strategy(bencher, StrategyType::Async, rows);
}

/// Benchmark the rule engine alone, without CSV I/O
#[divan::bench(args = [100, 10_000])]
fn rule_engine(bencher: Bencher, rows: usize) {
    let ledger: Vec<LedgerRow> = (0..rows)
        .map(|i| {
            let (label, specification) = LABELS[i % LABELS.len()];
            LedgerRow::new(label, Decimal::new(50_000 + i as i64, 2))
                .with_specification(specification)
        })
        .collect();

    bencher.bench_local(|| classify_and_correct(divan::black_box(&ledger)));
}

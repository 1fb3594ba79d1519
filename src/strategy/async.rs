//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Rows are read in batches; each batch is split
//! into chunks that are classified in parallel on a tokio multi-threaded
//! runtime and then reassembled in input order before being written.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── RuleEngine  (copied into every worker task)
//!     └── ResultWriter (in-order CSV output)
//! ```
//!
//! Rows are independent of each other, so no shared state or locking is
//! needed; ordering is restored by awaiting the chunk tasks in spawn order.

use crate::core::RuleEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::ResultWriter;
use crate::io::sync_reader::open_input;
use crate::strategy::{ProcessingOptions, ProcessingStrategy, ProcessingSummary};
use crate::types::{CorrectionResult, EngineError, LedgerRecord};
use std::io::Write;
use std::path::Path;

/// Configuration for batch processing
///
/// Controls how many rows are read per batch and how many worker tasks
/// process a batch in parallel.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchConfig {
    /// Number of rows per batch
    pub batch_size: usize,
    /// Maximum number of chunks processed concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    options: ProcessingOptions,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(options: ProcessingOptions, config: BatchConfig) -> Self {
        Self { options, config }
    }
}

/// Classify a batch in parallel, returning results in input order
async fn correct_batch(
    engine: RuleEngine,
    records: Vec<LedgerRecord>,
    workers: usize,
) -> Result<Vec<(LedgerRecord, CorrectionResult)>, EngineError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = records.len().div_ceil(workers.max(1));
    let mut remaining = records;
    let mut tasks = Vec::new();

    while !remaining.is_empty() {
        let rest = remaining.split_off(chunk_size.min(remaining.len()));
        let chunk = std::mem::replace(&mut remaining, rest);

        tasks.push(tokio::spawn(async move {
            chunk
                .into_iter()
                .map(|record| {
                    let result = engine.process(&record.row);
                    (record, result)
                })
                .collect::<Vec<_>>()
        }));
    }

    let mut corrected = Vec::new();
    for task in tasks {
        let chunk = task
            .await
            .map_err(|e| EngineError::worker_failure(&e.to_string()))?;
        corrected.extend(chunk);
    }

    Ok(corrected)
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process a ledger export and write results to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Opens the file with an AsyncReader (validates the header row)
    /// 3. Reads batches, applying the malformed-row policy to failed rows
    /// 4. Classifies each batch in parallel chunks
    /// 5. Writes the batch in input order before reading the next one
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| {
                EngineError::worker_failure(&format!("Failed to create tokio runtime: {}", e))
            })?;

        runtime.block_on(async {
            let engine = RuleEngine::new(self.options.policy);

            let file = tokio::fs::File::from_std(open_input(input_path)?);

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file, self.options.csv).await?;

            let mut writer = ResultWriter::new(output, &reader.headers())?;
            let mut summary = ProcessingSummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let mut records = Vec::with_capacity(batch.len());
                for result in batch {
                    match result {
                        Ok(record) => records.push(record),
                        Err(e) => summary.reject(e, self.options.strict)?,
                    }
                }

                let corrected =
                    correct_batch(engine, records, self.config.max_concurrent_batches).await?;
                for (record, correction) in &corrected {
                    writer.write(record, correction)?;
                    summary.record(&record.row, correction);
                }
            }

            writer.finish()?;
            summary.log();

            Ok(summary)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SyncProcessingStrategy;
    use crate::types::LedgerRow;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn ledger(rows: usize) -> String {
        let labels = [
            "Representatiekosten",
            "Autokosten benzine",
            "Auto elektrisch",
            "Boete",
            "Huur kantoor",
            "Kantoorbenodigdheden",
        ];
        let mut content = String::from("Grootboekrekening,Bedrag (EUR)\n");
        for i in 0..rows {
            content.push_str(&format!("{} {},{}.25\n", labels[i % labels.len()], i, 1000 + i * 7));
        }
        content
    }

    #[test]
    fn test_batch_config_zero_values_fall_back() {
        let config = BatchConfig::new(0, 0);
        assert_eq!(config, BatchConfig::default());
    }

    #[test]
    fn test_async_strategy_matches_sync_output() {
        let file = create_temp_csv(&ledger(53));

        let mut sync_output = Vec::new();
        SyncProcessingStrategy::default()
            .process(file.path(), &mut sync_output)
            .unwrap();

        // small batches and several workers force chunking across batches
        let strategy =
            AsyncProcessingStrategy::new(ProcessingOptions::default(), BatchConfig::new(10, 4));
        let mut async_output = Vec::new();
        let summary = strategy.process(file.path(), &mut async_output).unwrap();

        assert_eq!(summary.rows, 53);
        assert_eq!(
            String::from_utf8(async_output).unwrap(),
            String::from_utf8(sync_output).unwrap()
        );
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy =
            AsyncProcessingStrategy::new(ProcessingOptions::default(), BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(matches!(result, Err(EngineError::FileNotFound { .. })));
    }

    #[test]
    fn test_async_strategy_skips_and_strict_fails() {
        let content = "Grootboekrekening,Bedrag (EUR)\nHuur,100\nRente,???\nBoete,5\n";
        let file = create_temp_csv(content);

        let lenient =
            AsyncProcessingStrategy::new(ProcessingOptions::default(), BatchConfig::new(2, 2));
        let summary = lenient.process(file.path(), &mut Vec::<u8>::new()).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.skipped, 1);

        let strict = AsyncProcessingStrategy::new(
            ProcessingOptions {
                strict: true,
                ..ProcessingOptions::default()
            },
            BatchConfig::new(2, 2),
        );
        let result = strict.process(file.path(), &mut Vec::<u8>::new());
        assert_eq!(result, Err(EngineError::invalid_amount("???", Some(3))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_correct_batch_preserves_order() {
        let records: Vec<LedgerRecord> = (0..17)
            .map(|i| LedgerRecord {
                line: i + 2,
                fields: vec![],
                row: LedgerRow::new(format!("Post {}", i), Decimal::from(i)),
            })
            .collect();

        let corrected = correct_batch(RuleEngine::default(), records, 5).await.unwrap();

        let lines: Vec<u64> = corrected.iter().map(|(record, _)| record.line).collect();
        assert_eq!(lines, (2..19).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_correct_batch_empty() {
        let corrected = correct_batch(RuleEngine::default(), Vec::new(), 4).await.unwrap();
        assert!(corrected.is_empty());
    }
}

//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates processing by coordinating
//! between the SyncReader (for CSV input), the RuleEngine (for classification
//! and correction) and the ResultWriter (for CSV output).
//!
//! # Memory Efficiency
//!
//! Rows are read, corrected and written one at a time; memory usage does not
//! grow with the size of the export.

use crate::core::RuleEngine;
use crate::io::csv_format::ResultWriter;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingOptions, ProcessingStrategy, ProcessingSummary};
use crate::types::EngineError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use fiscal_correction_engine::strategy::{
///     ProcessingOptions, ProcessingStrategy, SyncProcessingStrategy,
/// };
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ProcessingOptions::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("grootboek.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    options: ProcessingOptions,
}

impl SyncProcessingStrategy {
    /// Create a new SyncProcessingStrategy
    pub fn new(options: ProcessingOptions) -> Self {
        Self { options }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process a ledger export and write results to output
    ///
    /// 1. Opens the file with a SyncReader (validates the header row)
    /// 2. Writes the output header
    /// 3. Classifies, corrects and writes each row as it is read
    /// 4. Applies the malformed-row policy to failed rows
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, EngineError> {
        let engine = RuleEngine::new(self.options.policy);
        let reader = SyncReader::new(input_path, self.options.csv)?;
        let mut writer = ResultWriter::new(output, &reader.headers())?;
        let mut summary = ProcessingSummary::default();

        for result in reader {
            match result {
                Ok(record) => {
                    let correction = engine.process(&record.row);
                    writer.write(&record, &correction)?;
                    summary.record(&record.row, &correction);
                }
                Err(e) => summary.reject(e, self.options.strict)?,
            }
        }

        writer.finish()?;
        summary.log();

        Ok(summary)
    }
}

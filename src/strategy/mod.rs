//! Processing strategy module for ledger processing
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing CSV parsing, rule engine evaluation and CSV output. This
//! allows different implementations (synchronous, asynchronous batch) to be
//! selected at runtime. Both produce byte-identical output for the same input.

use crate::cli::StrategyType;
use crate::core::TaxPolicy;
use crate::io::CsvOptions;
use crate::types::{CorrectionResult, EngineError, LedgerRow};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Settings shared by every strategy
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProcessingOptions {
    /// Deductibility parameters handed to the rule engine
    pub policy: TaxPolicy,

    /// Input format
    pub csv: CsvOptions,

    /// Abort on the first malformed row instead of skipping it
    pub strict: bool,
}

/// Outcome of a processing run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingSummary {
    /// Rows classified and written
    pub rows: usize,

    /// Malformed rows that were skipped
    pub skipped: usize,

    /// Sum of all processed amounts
    pub total_amount: Decimal,

    /// Sum of all deductible amounts
    pub total_deductible: Decimal,

    /// Sum of all correction amounts
    pub total_correction: Decimal,
}

impl ProcessingSummary {
    /// Add a processed row to the totals
    pub fn record(&mut self, row: &LedgerRow, result: &CorrectionResult) {
        self.rows += 1;
        self.total_amount = self.total_amount.saturating_add(row.amount);
        self.total_deductible = self
            .total_deductible
            .saturating_add(result.deductible_amount);
        self.total_correction = self
            .total_correction
            .saturating_add(result.correction_amount);
    }

    /// Apply the malformed-row policy to a failed record
    ///
    /// In strict mode the error is returned and the run aborts; otherwise it
    /// is logged and counted as skipped.
    pub fn reject(&mut self, error: EngineError, strict: bool) -> Result<(), EngineError> {
        if strict {
            return Err(error);
        }

        tracing::warn!("Skipping row: {}", error);
        self.skipped += 1;
        Ok(())
    }

    fn log(&self) {
        tracing::info!(
            rows = self.rows,
            skipped = self.skipped,
            total = %self.total_amount,
            deductible = %self.total_deductible,
            correction = %self.total_correction,
            "ledger processed"
        );
    }
}

/// Processing strategy trait for complete ledger processing pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Process a ledger export and write the annotated table to output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - A required column is missing
    /// - Output cannot be written
    /// - Strict mode is on and a row is malformed
    ///
    /// In lenient mode malformed rows are logged, skipped and counted in the
    /// returned summary.
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, EngineError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    options: ProcessingOptions,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(options)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(options, config))
        }
    }
}

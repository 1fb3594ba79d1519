use crate::core::policy::{
    TaxPolicy, ELECTRIC_VEHICLE_EXCESS_RATE, ELECTRIC_VEHICLE_THRESHOLD,
    FUEL_VEHICLE_DEDUCTIBLE_RATE, REPRESENTATION_DEDUCTIBLE_RATE,
};
use crate::io::CsvOptions;
use crate::strategy::{BatchConfig, ProcessingOptions};
use crate::types::EngineError;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Classify ledger rows and compute Dutch tax corrections
#[derive(Parser, Debug)]
#[command(name = "fiscal-correction-engine")]
#[command(about = "Classify ledger rows and compute tax corrections", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing the ledger export
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Output CSV file path (stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for streaming or 'async' for parallel batches"
    )]
    pub strategy: StrategyType,

    /// Number of rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent workers (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of chunks processing concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Field delimiter of the input file
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long = "strict")]
    pub strict: bool,

    /// Electric car costs up to this amount are fully deductible
    #[arg(long = "ev-threshold", value_name = "EUR")]
    pub ev_threshold: Option<Decimal>,

    /// Deductible share of electric car costs above the threshold
    #[arg(long = "ev-excess-rate", value_name = "RATE")]
    pub ev_excess_rate: Option<Decimal>,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Unset values use the defaults; zero values fall back to the defaults
    /// with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Build the tax policy from the defaults and any overrides
    pub fn to_policy(&self) -> Result<TaxPolicy, EngineError> {
        TaxPolicy::new(
            REPRESENTATION_DEDUCTIBLE_RATE,
            FUEL_VEHICLE_DEDUCTIBLE_RATE,
            self.ev_threshold.unwrap_or(ELECTRIC_VEHICLE_THRESHOLD),
            self.ev_excess_rate.unwrap_or(ELECTRIC_VEHICLE_EXCESS_RATE),
        )
    }

    /// Build the shared processing options
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPolicy` for out-of-range policy values
    /// and `EngineError::ParseError` for a delimiter outside ASCII.
    pub fn to_processing_options(&self) -> Result<ProcessingOptions, EngineError> {
        if !self.delimiter.is_ascii() {
            return Err(EngineError::parse_error(
                None,
                &format!("delimiter '{}' must be a single ASCII character", self.delimiter),
            ));
        }

        Ok(ProcessingOptions {
            policy: self.to_policy()?,
            csv: CsvOptions {
                delimiter: self.delimiter as u8,
            },
            strict: self.strict,
        })
    }
}

//! Error types for the fiscal correction engine
//!
//! This module defines all error types that can occur while loading a ledger
//! export, configuring the tax policy, or writing the annotated result.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Errors**: Malformed CSV, missing required columns
//! - **Row Validation Errors**: Amounts that are not valid numbers
//! - **Policy Errors**: Out-of-range rates or thresholds
//! - **Worker Errors**: Runtime or task failures in the async strategy

use thiserror::Error;

/// Main error type for the fiscal correction engine
///
/// The rule engine itself never fails: unknown labels degrade to
/// `Overige kosten`. Every variant here belongs to the loading, configuration
/// or output side of the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Skipped in lenient mode, fatal in strict mode.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The header row lacks one or more required columns
    ///
    /// Raised before any row reaches the rule engine.
    #[error("CSV is missing required column(s): {}", columns.iter().map(|c| format!("'{}'", c)).collect::<Vec<_>>().join(", "))]
    MissingColumns {
        /// Names of the required columns that were not found
        columns: Vec<String>,
    },

    /// Amount field is not a valid decimal number
    #[error("Invalid amount '{amount}'{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidAmount {
        /// The invalid amount text
        amount: String,
        /// Line number of the offending row (if available)
        line: Option<u64>,
    },

    /// Tax policy parameters out of range
    #[error("Invalid tax policy: {message}")]
    InvalidPolicy {
        /// Description of the rejected parameter
        message: String,
    },

    /// A worker task of the async strategy failed or the runtime could not start
    #[error("Worker failure: {message}")]
    WorkerFailure {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        EngineError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for EngineError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        EngineError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl EngineError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        EngineError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a ParseError
    pub fn parse_error(line: Option<u64>, message: &str) -> Self {
        EngineError::ParseError {
            line,
            message: message.to_string(),
        }
    }

    /// Create a MissingColumns error
    pub fn missing_columns(columns: &[&str]) -> Self {
        EngineError::MissingColumns {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, line: Option<u64>) -> Self {
        EngineError::InvalidAmount {
            amount: amount.to_string(),
            line,
        }
    }

    /// Create an InvalidPolicy error
    pub fn invalid_policy(message: &str) -> Self {
        EngineError::InvalidPolicy {
            message: message.to_string(),
        }
    }

    /// Create a WorkerFailure error
    pub fn worker_failure(message: &str) -> Self {
        EngineError::WorkerFailure {
            message: message.to_string(),
        }
    }
}

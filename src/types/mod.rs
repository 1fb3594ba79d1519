//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `category`: The closed set of tax categories
//! - `ledger`: Ledger rows, loaded records and correction results
//! - `error`: Error types for the fiscal correction engine

pub mod category;
pub mod error;
pub mod ledger;

pub use category::Category;
pub use error::EngineError;
pub use ledger::{CorrectionResult, LedgerRecord, LedgerRow, LineNumber};

//! Ledger-related types for the fiscal correction engine
//!
//! This module defines the input row handed to the rule engine, the
//! per-row correction it produces, and the loader-side record that keeps the
//! original CSV fields around for the output writer.

use super::category::Category;
use rust_decimal::Decimal;

/// Source line number in the input file (1-based, header is line 1)
pub type LineNumber = u64;

/// One line item from a bookkeeping export
///
/// This is the only input the rule engine looks at. The loader is responsible
/// for turning CSV text into this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    /// Free-text ledger account label (`Grootboekrekening`)
    pub account_label: String,

    /// Optional free-text sub-specification (`Specificatie`)
    ///
    /// Empty string when the column is absent or the cell is empty.
    pub specification: String,

    /// Monetary amount in euros, any sign
    pub amount: Decimal,
}

impl LedgerRow {
    /// Create a row without a specification
    pub fn new(account_label: impl Into<String>, amount: Decimal) -> Self {
        LedgerRow {
            account_label: account_label.into(),
            specification: String::new(),
            amount,
        }
    }

    /// Attach a sub-specification to the row
    pub fn with_specification(mut self, specification: impl Into<String>) -> Self {
        self.specification = specification.into();
        self
    }
}

/// Tax correction for a single ledger row
///
/// Invariant: `deductible_amount + correction_amount == amount` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionResult {
    /// Category assigned by the rule table
    pub category: Category,

    /// Portion of the amount that may be deducted from taxable profit
    pub deductible_amount: Decimal,

    /// Portion of the amount added back to taxable profit
    pub correction_amount: Decimal,

    /// Human-readable rule and legal citation
    pub explanation: String,
}

/// A ledger row as loaded from the input file
///
/// Carries the parsed [`LedgerRow`] together with the raw, trimmed fields of
/// the source record so the writer can echo every original column.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    /// Line number of the record in the source file
    pub line: LineNumber,

    /// Raw field values in source column order
    pub fields: Vec<String>,

    /// Parsed row handed to the rule engine
    pub row: LedgerRow,
}

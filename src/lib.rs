//! Fiscal Correction Engine Library
//! # Overview
//!
//! This library classifies ledger rows of a Dutch bookkeeping export into tax
//! categories and computes, for every row, the fiscally deductible amount and
//! the correction (the non-deductible remainder). Processing streams a CSV
//! export through either a sync or an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Category, LedgerRow, CorrectionResult, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::rules`] - Ordered keyword rules, first match wins
//!   - [`core::policy`] - Deductibility per category
//!   - [`core::engine`] - Classification and correction of rows
//! - [`io`] - CSV reading and the annotated output table
//! - [`strategy`] - Pluggable processing pipelines
//!
//! # Deductibility
//!
//! - **Representatiekosten**: 80% deductible
//! - **Autokosten**: 90% deductible
//! - **Autokosten elektrisch**: fully deductible up to €2100, 90% of the rest
//! - **Boetes** and **Kosten eigen woning**: not deductible
//! - Every other category is fully deductible
//!
//! For every row `deductible + correction == amount` holds exactly.
//!
//! ```
//! use fiscal_correction_engine::{classify_and_correct, Category, LedgerRow};
//! use rust_decimal::Decimal;
//!
//! let rows = vec![LedgerRow::new("Representatiekosten", Decimal::from(1000))];
//! let results = classify_and_correct(&rows);
//!
//! assert_eq!(results[0].category, Category::RepresentationCosts);
//! assert_eq!(results[0].deductible_amount, Decimal::from(800));
//! assert_eq!(results[0].correction_amount, Decimal::from(200));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{classify_and_correct, RuleEngine, TaxPolicy};
pub use io::write_results_csv;
pub use types::{Category, CorrectionResult, EngineError, LedgerRecord, LedgerRow, LineNumber};

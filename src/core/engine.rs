//! Rule engine
//!
//! This module provides the [`RuleEngine`], the single entry point the
//! loading and presentation layers call into. It combines the ordered rule
//! table from [`crate::core::rules`] with the deductibility lookup from
//! [`crate::core::policy`].
//!
//! The engine is a pure function of its input: no I/O, no shared mutable
//! state, and rows never influence each other. Calling it twice on the same
//! rows yields identical results.

use crate::core::policy::TaxPolicy;
use crate::core::rules;
use crate::types::{Category, CorrectionResult, LedgerRow};
use rust_decimal::Decimal;

/// Classifies ledger rows and computes their tax corrections
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RuleEngine {
    policy: TaxPolicy,
}

impl RuleEngine {
    /// Create an engine using the given policy
    pub fn new(policy: TaxPolicy) -> Self {
        RuleEngine { policy }
    }

    /// The policy this engine applies
    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    /// Determine the category of a row
    ///
    /// Unrecognized labels degrade to [`Category::OtherCosts`].
    pub fn classify(&self, row: &LedgerRow) -> Category {
        rules::classify(row)
    }

    /// Split an amount according to the category's deductibility
    pub fn correct(&self, category: Category, amount: Decimal) -> CorrectionResult {
        self.policy.correct(category, amount)
    }

    /// Classify and correct a single row
    pub fn process(&self, row: &LedgerRow) -> CorrectionResult {
        let category = self.classify(row);
        let result = self.correct(category, row.amount);

        tracing::debug!(
            label = %row.account_label,
            category = %result.category,
            deductible = %result.deductible_amount,
            correction = %result.correction_amount,
            "classified ledger row"
        );

        result
    }

    /// Classify and correct a sequence of rows
    ///
    /// Results are returned in input order, one per row.
    pub fn classify_and_correct(&self, rows: &[LedgerRow]) -> Vec<CorrectionResult> {
        rows.iter().map(|row| self.process(row)).collect()
    }
}

/// Classify and correct rows under the default [`TaxPolicy`]
pub fn classify_and_correct(rows: &[LedgerRow]) -> Vec<CorrectionResult> {
    RuleEngine::default().classify_and_correct(rows)
}

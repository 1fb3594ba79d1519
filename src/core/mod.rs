//! Core business logic module
//!
//! This module contains the rule engine components:
//! - `rules` - Ordered keyword rule table and classification
//! - `policy` - Deductibility parameters and the correction table
//! - `engine` - The `RuleEngine` combining both

pub mod engine;
pub mod policy;
pub mod rules;

pub use engine::{classify_and_correct, RuleEngine};
pub use policy::{Deductibility, TaxPolicy};
pub use rules::{classify, Rule, RULES};

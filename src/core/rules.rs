//! Ordered keyword rule table for ledger classification
//!
//! Classification is an ordered cascade: the first rule whose keywords match
//! the lowercased account label and specification wins. Labels routinely
//! contain keywords of more than one rule ("elektrische auto" is both a car
//! and electric), so the position of a rule in [`RULES`] is part of its
//! meaning.

use crate::types::{Category, LedgerRow};

/// A single classification rule
///
/// A rule fires when the haystack contains at least one of `keywords`, and,
/// if `requires` is non-empty, also at least one of `requires`. Substrings
/// listed in `excludes` are blanked out of the haystack before matching.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Category assigned when the rule fires
    pub category: Category,

    /// Any-of markers
    pub keywords: &'static [&'static str],

    /// Additional any-of markers that must also be present
    pub requires: &'static [&'static str],

    /// Words that contain a keyword but mean something else
    pub excludes: &'static [&'static str],
}

const VEHICLE_MARKERS: &[&str] = &[
    "auto",
    "voertuig",
    "vehicle",
    "brandstof",
    "benzine",
    "diesel",
];

// "automatisering" is IT, a "koffieautomaat" is a vending machine,
// "autoriteit" and "autorisatie" are regulators and permits
const VEHICLE_EXCLUDES: &[&str] = &["automatisering", "automaat", "autoriteit", "autorisatie"];

const ELECTRIC_MARKERS: &[&str] = &["elektr", "electric"];

/// The canonical rule table, in evaluation order
pub const RULES: &[Rule] = &[
    Rule {
        category: Category::VehicleCostsElectric,
        keywords: VEHICLE_MARKERS,
        requires: ELECTRIC_MARKERS,
        excludes: VEHICLE_EXCLUDES,
    },
    Rule {
        category: Category::VehicleCostsFuel,
        keywords: VEHICLE_MARKERS,
        requires: &[],
        excludes: VEHICLE_EXCLUDES,
    },
    Rule {
        category: Category::PayrollCosts,
        keywords: &["personeel", "salaris", "loon", "dga", "payroll", "wages"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::Depreciation,
        keywords: &["afschrijving", "depreciation"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::RepresentationCosts,
        keywords: &["representatie", "relatiegeschenk", "zakenlunch", "zakendiner"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::HousingCosts,
        keywords: &["huur", "huisvesting", "kantoorruimte"],
        requires: &[],
        excludes: &["inhuur"],
    },
    Rule {
        category: Category::Fines,
        keywords: &["boete", "bekeuring", "penalty"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::OwnerHomeCosts,
        keywords: &["eigen woning"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::Interest,
        keywords: &["rente", "interest"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::Provisions,
        keywords: &["voorziening", "provision"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::Insurance,
        keywords: &["verzekering", "insurance"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::AdvisoryCosts,
        keywords: &["advies", "adviseur", "accountant", "notaris", "juridisch"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::TelephonyCosts,
        keywords: &["telefoon", "telefonie", "internet", "mobiel"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::TravelCosts,
        keywords: &["reis", "travel", "trein", "openbaar vervoer"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::BankAndCash,
        keywords: &["bank", "kas", "kruispost"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::Receivables,
        keywords: &["debiteur"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::Payables,
        keywords: &["crediteur"],
        requires: &[],
        excludes: &[],
    },
    // before Revenue: "omzetbelasting" contains "omzet"
    Rule {
        category: Category::Vat,
        keywords: &["btw", "omzetbelasting", "voorbelasting"],
        requires: &[],
        excludes: &[],
    },
    // before Revenue: "kostprijs omzet", "inkoopwaarde van de omzet"
    Rule {
        category: Category::Purchasing,
        keywords: &["inkoop", "inkopen", "kostprijs"],
        requires: &[],
        excludes: &[],
    },
    Rule {
        category: Category::Revenue,
        keywords: &["omzet", "opbrengst", "revenue"],
        requires: &[],
        excludes: &[],
    },
];

impl Rule {
    /// Check the rule against an already lowercased haystack
    pub fn matches(&self, haystack: &str) -> bool {
        if self.excludes.is_empty() {
            return self.matches_unfiltered(haystack);
        }

        let mut filtered = haystack.to_string();
        for excluded in self.excludes {
            filtered = filtered.replace(excluded, " ");
        }
        self.matches_unfiltered(&filtered)
    }

    fn matches_unfiltered(&self, haystack: &str) -> bool {
        let keyword_hit = self.keywords.iter().any(|k| haystack.contains(k));
        let required_hit =
            self.requires.is_empty() || self.requires.iter().any(|r| haystack.contains(r));
        keyword_hit && required_hit
    }
}

/// Build the lowercased text the rules are matched against
pub fn haystack(row: &LedgerRow) -> String {
    let mut text = row.account_label.to_lowercase();
    if !row.specification.is_empty() {
        text.push(' ');
        text.push_str(&row.specification.to_lowercase());
    }
    text
}

/// Find the first rule in `rules` matching the row
pub fn first_match<'a>(rules: &'a [Rule], row: &LedgerRow) -> Option<&'a Rule> {
    let text = haystack(row);
    rules.iter().find(|rule| rule.matches(&text))
}

/// Classify a ledger row with the canonical rule table
///
/// Never fails: rows matching no rule are [`Category::OtherCosts`].
pub fn classify(row: &LedgerRow) -> Category {
    first_match(RULES, row)
        .map(|rule| rule.category)
        .unwrap_or(Category::OtherCosts)
}

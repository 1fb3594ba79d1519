//! Tax-relevant ledger categories
//!
//! The set of categories is closed: every ledger row maps to exactly one
//! variant, with [`Category::OtherCosts`] as the fallback.

use std::fmt;

/// Tax-relevant category of a ledger row
///
/// Variants are named in English; [`Category::label`] returns the Dutch label
/// written to the output CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Business entertainment and relation gifts
    RepresentationCosts,

    /// Company car running on fuel (petrol/diesel)
    VehicleCostsFuel,

    /// Company car running on electricity
    VehicleCostsElectric,

    /// Wages and owner-director salary
    PayrollCosts,

    /// Depreciation of fixed assets
    Depreciation,

    /// Office and premises rent
    HousingCosts,

    /// Fines and penalties
    Fines,

    /// Costs of the owner's private home
    OwnerHomeCosts,

    /// Interest expense
    Interest,

    /// Provisions
    Provisions,

    /// Insurance premiums
    Insurance,

    /// Accountant, legal and other advisory fees
    AdvisoryCosts,

    /// Phone and internet subscriptions
    TelephonyCosts,

    /// Travel expenses
    TravelCosts,

    /// Bank and cash accounts
    BankAndCash,

    /// Accounts receivable
    Receivables,

    /// Accounts payable
    Payables,

    /// Value added tax
    Vat,

    /// Revenue
    Revenue,

    /// Purchasing and cost of goods
    Purchasing,

    /// Anything not recognized by the rule table
    OtherCosts,
}

impl Category {
    /// Dutch label of the category as shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Category::RepresentationCosts => "Representatiekosten",
            Category::VehicleCostsFuel => "Autokosten",
            Category::VehicleCostsElectric => "Autokosten elektrisch",
            Category::PayrollCosts => "Personeelskosten",
            Category::Depreciation => "Afschrijvingen",
            Category::HousingCosts => "Huisvestingskosten",
            Category::Fines => "Boetes",
            Category::OwnerHomeCosts => "Kosten eigen woning",
            Category::Interest => "Rentelasten",
            Category::Provisions => "Voorzieningen",
            Category::Insurance => "Verzekeringen",
            Category::AdvisoryCosts => "Advieskosten",
            Category::TelephonyCosts => "Telefoon- en internetkosten",
            Category::TravelCosts => "Reiskosten",
            Category::BankAndCash => "Bank en kas",
            Category::Receivables => "Debiteuren",
            Category::Payables => "Crediteuren",
            Category::Vat => "Omzetbelasting",
            Category::Revenue => "Omzet",
            Category::Purchasing => "Inkoopkosten",
            Category::OtherCosts => "Overige kosten",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Deductibility policy and correction table
//!
//! The percentages below follow Dutch income and corporate tax practice.
//! They change when the law changes, so they live in [`TaxPolicy`] with named
//! defaults instead of being spread through the code.

use crate::types::{Category, CorrectionResult, EngineError};
use rust_decimal::Decimal;

/// Deductible share of representation costs (80%)
pub const REPRESENTATION_DEDUCTIBLE_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Deductible share of fuel-powered company car costs (90%)
pub const FUEL_VEHICLE_DEDUCTIBLE_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Electric car costs up to this amount are fully deductible (EUR)
pub const ELECTRIC_VEHICLE_THRESHOLD: Decimal = Decimal::from_parts(2100, 0, 0, false, 0);

/// Deductible share of electric car costs above the threshold (90%)
pub const ELECTRIC_VEHICLE_EXCESS_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// How a category's amount splits into deductible and correction parts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deductibility {
    /// Whole amount deductible
    Full,

    /// Nothing deductible
    None,

    /// Fixed share deductible
    Rate(Decimal),

    /// Fully deductible up to `threshold`, `excess_rate` above it
    Threshold {
        threshold: Decimal,
        excess_rate: Decimal,
    },
}

impl Deductibility {
    /// Deductible part of `amount`
    pub fn deductible(&self, amount: Decimal) -> Decimal {
        match *self {
            Deductibility::Full => amount,
            Deductibility::None => Decimal::ZERO,
            Deductibility::Rate(rate) => amount * rate,
            Deductibility::Threshold {
                threshold,
                excess_rate,
            } => {
                if amount <= threshold {
                    amount
                } else {
                    threshold + (amount - threshold) * excess_rate
                }
            }
        }
    }
}

/// Active set of deductibility parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxPolicy {
    /// Deductible share of representation costs
    pub representation_rate: Decimal,
    /// Deductible share of fuel-powered car costs
    pub fuel_vehicle_rate: Decimal,
    /// Electric car costs up to this amount are fully deductible
    pub electric_vehicle_threshold: Decimal,
    /// Deductible share of electric car costs above the threshold
    pub electric_vehicle_excess_rate: Decimal,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            representation_rate: REPRESENTATION_DEDUCTIBLE_RATE,
            fuel_vehicle_rate: FUEL_VEHICLE_DEDUCTIBLE_RATE,
            electric_vehicle_threshold: ELECTRIC_VEHICLE_THRESHOLD,
            electric_vehicle_excess_rate: ELECTRIC_VEHICLE_EXCESS_RATE,
        }
    }
}

impl TaxPolicy {
    /// Create a policy with custom parameters
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPolicy` if a rate lies outside `[0, 1]`
    /// or the threshold is negative.
    pub fn new(
        representation_rate: Decimal,
        fuel_vehicle_rate: Decimal,
        electric_vehicle_threshold: Decimal,
        electric_vehicle_excess_rate: Decimal,
    ) -> Result<Self, EngineError> {
        check_rate("representation rate", representation_rate)?;
        check_rate("fuel vehicle rate", fuel_vehicle_rate)?;
        check_rate("electric vehicle excess rate", electric_vehicle_excess_rate)?;
        if electric_vehicle_threshold.is_sign_negative() {
            return Err(EngineError::invalid_policy(&format!(
                "electric vehicle threshold {} must not be negative",
                electric_vehicle_threshold
            )));
        }

        Ok(Self {
            representation_rate,
            fuel_vehicle_rate,
            electric_vehicle_threshold,
            electric_vehicle_excess_rate,
        })
    }

    /// Look up how a category is treated under this policy
    pub fn deductibility(&self, category: Category) -> Deductibility {
        match category {
            Category::RepresentationCosts => Deductibility::Rate(self.representation_rate),
            Category::VehicleCostsFuel => Deductibility::Rate(self.fuel_vehicle_rate),
            Category::VehicleCostsElectric => Deductibility::Threshold {
                threshold: self.electric_vehicle_threshold,
                excess_rate: self.electric_vehicle_excess_rate,
            },
            Category::Fines | Category::OwnerHomeCosts => Deductibility::None,
            _ => Deductibility::Full,
        }
    }

    /// Split `amount` for `category` into deductible and correction parts
    ///
    /// `correction_amount` is always `amount - deductible_amount`, so the two
    /// parts add up to the amount exactly.
    pub fn correct(&self, category: Category, amount: Decimal) -> CorrectionResult {
        let deductible_amount = self.deductibility(category).deductible(amount);

        CorrectionResult {
            category,
            deductible_amount,
            correction_amount: amount - deductible_amount,
            explanation: self.explain(category, amount),
        }
    }

    /// Citation text for a category
    ///
    /// For electric cars the text depends on which side of the threshold
    /// the amount falls.
    pub fn explain(&self, category: Category, amount: Decimal) -> String {
        match category {
            Category::RepresentationCosts => format!(
                "{}% aftrekbaar (art. 3.14 Wet IB 2001)",
                percent(self.representation_rate)
            ),
            Category::VehicleCostsFuel => format!(
                "{}% aftrekbaar (rest privégebruik of bijtelling)",
                percent(self.fuel_vehicle_rate)
            ),
            Category::VehicleCostsElectric => {
                if amount > self.electric_vehicle_threshold {
                    format!(
                        "100% aftrekbaar tot €{}, rest {}%",
                        self.electric_vehicle_threshold.normalize(),
                        percent(self.electric_vehicle_excess_rate)
                    )
                } else {
                    "100% aftrekbaar".to_string()
                }
            }
            Category::Fines => "Niet aftrekbaar (art. 3.14 Wet IB 2001)".to_string(),
            Category::OwnerHomeCosts => "Niet aftrekbaar in VPB".to_string(),
            _ => "Volledig aftrekbaar".to_string(),
        }
    }
}

fn check_rate(name: &str, rate: Decimal) -> Result<(), EngineError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::invalid_policy(&format!(
            "{} {} must be between 0 and 1",
            name, rate
        )));
    }
    Ok(())
}

fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LeaseRentError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LeaseRentResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Site and cost parameters from which the total development cost is derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevelopmentCostInput {
    /// Land plot area in square metres
    pub land_area_sqm: Decimal,
    /// Buildable floor area as a multiple of the land area (FAR)
    pub building_factor: Decimal,
    /// Share of the plot covered by buildings (60 = 60%); the remainder is
    /// landscaped
    pub building_ratio_pct: Percent,
    /// Construction cost per square metre of buildable area
    pub construction_cost_per_sqm: Money,
    /// Landscaping cost per square metre of uncovered area
    pub landscaping_cost_per_sqm: Money,
    /// Infrastructure cost per square metre of land
    pub infrastructure_cost_per_sqm: Money,
    /// Design fees as a percentage of basic costs
    pub design_cost_ratio_pct: Percent,
    /// Supervision fees as a percentage of basic costs
    pub supervision_cost_ratio_pct: Percent,
    /// Contingency allowance as a percentage of basic costs
    pub contingency_cost_ratio_pct: Percent,
}

/// Itemised development cost build-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevelopmentCostBreakdown {
    /// land_area × building_factor
    pub buildable_area_sqm: Decimal,
    /// Uncovered plot area to be landscaped
    pub remaining_area_sqm: Decimal,
    pub construction_cost: Money,
    pub landscaping_cost: Money,
    pub infrastructure_cost: Money,
    /// Construction + landscaping + infrastructure
    pub basic_costs: Money,
    pub design_cost: Money,
    pub supervision_cost: Money,
    pub contingency_cost: Money,
    pub total_additional_costs: Money,
    /// Basic costs plus all additional costs
    pub total_development_cost: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the itemised development cost from site parameters.
pub fn calculate_development_costs(
    input: &DevelopmentCostInput,
) -> LeaseRentResult<ComputationOutput<DevelopmentCostBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let buildable_area_sqm = input.land_area_sqm * input.building_factor;
    let remaining_area_sqm =
        input.land_area_sqm * (Decimal::ONE - input.building_ratio_pct / dec!(100));

    let construction_cost = buildable_area_sqm * input.construction_cost_per_sqm;
    let landscaping_cost = remaining_area_sqm * input.landscaping_cost_per_sqm;
    let infrastructure_cost = input.land_area_sqm * input.infrastructure_cost_per_sqm;
    let basic_costs = construction_cost + landscaping_cost + infrastructure_cost;

    let design_cost = basic_costs * input.design_cost_ratio_pct / dec!(100);
    let supervision_cost = basic_costs * input.supervision_cost_ratio_pct / dec!(100);
    let contingency_cost = basic_costs * input.contingency_cost_ratio_pct / dec!(100);
    let total_additional_costs = design_cost + supervision_cost + contingency_cost;

    let output = DevelopmentCostBreakdown {
        buildable_area_sqm,
        remaining_area_sqm,
        construction_cost,
        landscaping_cost,
        infrastructure_cost,
        basic_costs,
        design_cost,
        supervision_cost,
        contingency_cost,
        total_additional_costs,
        total_development_cost: basic_costs + total_additional_costs,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Development Cost Build-Up (area-based)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(
    input: &DevelopmentCostInput,
    warnings: &mut Vec<String>,
) -> LeaseRentResult<()> {
    if input.land_area_sqm <= Decimal::ZERO {
        return Err(LeaseRentError::InvalidInput {
            field: "land_area_sqm".into(),
            reason: "Land area must be positive".into(),
        });
    }
    if input.building_factor <= Decimal::ZERO {
        return Err(LeaseRentError::InvalidInput {
            field: "building_factor".into(),
            reason: "Building factor must be positive".into(),
        });
    }
    if input.building_ratio_pct < Decimal::ZERO || input.building_ratio_pct > dec!(100) {
        return Err(LeaseRentError::InvalidInput {
            field: "building_ratio_pct".into(),
            reason: "Building ratio must be between 0 and 100".into(),
        });
    }

    for (field, value) in [
        ("construction_cost_per_sqm", input.construction_cost_per_sqm),
        ("landscaping_cost_per_sqm", input.landscaping_cost_per_sqm),
        (
            "infrastructure_cost_per_sqm",
            input.infrastructure_cost_per_sqm,
        ),
        ("design_cost_ratio_pct", input.design_cost_ratio_pct),
        ("supervision_cost_ratio_pct", input.supervision_cost_ratio_pct),
        ("contingency_cost_ratio_pct", input.contingency_cost_ratio_pct),
    ] {
        if value < Decimal::ZERO {
            return Err(LeaseRentError::InvalidInput {
                field: field.into(),
                reason: "Must not be negative".into(),
            });
        }
    }

    if input.building_factor > dec!(10) {
        warnings.push(format!(
            "Building factor {} exceeds 10 — unusually dense development, verify zoning",
            input.building_factor
        ));
    }

    let additional_total = input.design_cost_ratio_pct
        + input.supervision_cost_ratio_pct
        + input.contingency_cost_ratio_pct;
    if additional_total > dec!(25) {
        warnings.push(format!(
            "Soft-cost ratios total {additional_total}% of basic costs — above typical 25%"
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

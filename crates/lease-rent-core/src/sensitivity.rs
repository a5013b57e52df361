use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::analysis::optimize_rent;
use crate::error::LeaseRentError;
use crate::projection::LeaseTerms;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LeaseRentResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lease-term field to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    ContractDurationYears,
    GracePeriodYears,
    RentIncreaseIntervalYears,
    RentIncreaseRatePct,
    CapitalizationRatePct,
    TotalDevelopmentCost,
}

/// Input for a one-way sensitivity sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    /// Base case terms; the swept field is replaced per point
    pub base: LeaseTerms,
    /// Which field to sweep
    pub parameter: SweepParameter,
    /// Values to test, in the order given
    pub values: Vec<Decimal>,
}

/// One swept point: the headline results at that parameter value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: Decimal,
    pub optimal_annual_rent: Money,
    pub npv: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_period_years: Option<u32>,
    pub annual_return_pct: Percent,
}

/// Output of a one-way sensitivity sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub parameter: SweepParameter,
    pub points: Vec<SensitivityPoint>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Re-run the full rent optimization at each swept value of one lease term.
pub fn run_sensitivity(
    input: &SensitivityInput,
) -> LeaseRentResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if input.values.is_empty() {
        return Err(LeaseRentError::InsufficientData(
            "Sensitivity sweep requires at least one value".into(),
        ));
    }

    let mut points = Vec::with_capacity(input.values.len());
    for &value in &input.values {
        let terms = apply_parameter(input.base.clone(), input.parameter, value)?;
        let analysis = optimize_rent(&terms)?;
        let out = analysis.result;
        points.push(SensitivityPoint {
            value,
            optimal_annual_rent: out.optimal_annual_rent,
            npv: out.npv,
            payback_period_years: out.payback_period_years,
            annual_return_pct: out.annual_return_pct,
        });
    }

    let output = SensitivityOutput {
        parameter: input.parameter,
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "One-Way Lease Sensitivity",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn apply_parameter(
    mut terms: LeaseTerms,
    parameter: SweepParameter,
    value: Decimal,
) -> LeaseRentResult<LeaseTerms> {
    match parameter {
        SweepParameter::ContractDurationYears => {
            terms.contract_duration_years = to_year_count(value, "contract_duration_years")?;
        }
        SweepParameter::GracePeriodYears => {
            terms.grace_period_years = to_year_count(value, "grace_period_years")?;
        }
        SweepParameter::RentIncreaseIntervalYears => {
            terms.rent_increase_interval_years =
                to_year_count(value, "rent_increase_interval_years")?;
        }
        SweepParameter::RentIncreaseRatePct => {
            terms.rent_increase_rate_pct = value;
        }
        SweepParameter::CapitalizationRatePct => {
            terms.capitalization_rate_pct = value;
        }
        SweepParameter::TotalDevelopmentCost => {
            terms.total_development_cost = value;
            // a derived cost would override the swept value
            terms.development_input = None;
        }
    }
    Ok(terms)
}

fn to_year_count(value: Decimal, field: &str) -> LeaseRentResult<u32> {
    if value < Decimal::ZERO || !value.fract().is_zero() {
        return Err(LeaseRentError::InvalidInput {
            field: field.into(),
            reason: format!("Year count must be a non-negative whole number, got {value}"),
        });
    }
    value.to_u32().ok_or_else(|| LeaseRentError::InvalidInput {
        field: field.into(),
        reason: format!("Year count {value} out of range"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

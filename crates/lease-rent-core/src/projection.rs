use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::development::DevelopmentCostInput;
use crate::types::{Currency, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a ground-lease projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseTerms {
    /// Total projection horizon in years
    pub contract_duration_years: u32,
    /// Initial rent-free years at the start of the contract
    pub grace_period_years: u32,
    /// Cadence of rent escalations after the grace period, in years
    pub rent_increase_interval_years: u32,
    /// Escalation percentage applied at each interval boundary (10 = 10%)
    pub rent_increase_rate_pct: Percent,
    /// Annual discount rate percentage used to present-value each year (7 = 7%)
    pub capitalization_rate_pct: Percent,
    /// Upfront development cost, applied as a negative cash flow at year 0.
    /// May be omitted when `development_input` is supplied.
    #[serde(default)]
    pub total_development_cost: Money,
    /// If provided, total_development_cost is computed from this input
    /// (overrides the field)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_input: Option<DevelopmentCostInput>,
    /// Reporting currency
    #[serde(default)]
    pub currency: Currency,
}

/// One projected contract year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyCashFlow {
    /// Contract year, 1-indexed
    pub year: u32,
    /// Nominal rent charged that year (0 during the grace period)
    pub annual_rent: Money,
    /// Escalation percentage applied in this year (0 when none)
    pub escalation_rate_pct: Percent,
    /// annual_rent discounted to present value at the capitalization rate
    pub discounted_cash_flow: Money,
    /// Running sum of discounted flows, seeded at -total_development_cost
    pub cumulative_cash_flow: Money,
}

/// Output of a cash-flow projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Net present value: the final cumulative cash flow
    pub npv: Money,
    /// Year-by-year schedule, exactly contract_duration_years entries
    pub schedule: Vec<YearlyCashFlow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the year-by-year rent schedule for a candidate annual rent.
///
/// Pure and deterministic. Assumes validated terms (see `analysis`) and uses
/// `terms.total_development_cost` as given; `development_input` resolution
/// happens at the analysis boundary.
pub fn project_rent_schedule(annual_rent: Money, terms: &LeaseTerms) -> ProjectionResult {
    let grace = terms.grace_period_years;
    let one_plus_cap = Decimal::ONE + terms.capitalization_rate_pct / dec!(100);
    let escalation_factor = Decimal::ONE + terms.rent_increase_rate_pct / dec!(100);

    let mut schedule = Vec::with_capacity(terms.contract_duration_years as usize);
    let mut current_rent = annual_rent;
    let mut cumulative = -terms.total_development_cost;
    let mut discount = Decimal::ONE;

    for year in 1..=terms.contract_duration_years {
        discount *= one_plus_cap;

        let mut rent = Decimal::ZERO;
        let mut escalation_applied = Decimal::ZERO;

        if year > grace {
            // The first post-grace year is always charged at the running
            // level; escalation fires every interval years after that,
            // compounding the running rent before it is charged.
            if year > grace + 1 && (year - grace - 1) % terms.rent_increase_interval_years == 0 {
                current_rent *= escalation_factor;
                escalation_applied = terms.rent_increase_rate_pct;
            }
            rent = current_rent;
        }

        let discounted = rent / discount;
        cumulative += discounted;

        schedule.push(YearlyCashFlow {
            year,
            annual_rent: rent,
            escalation_rate_pct: escalation_applied,
            discounted_cash_flow: discounted,
            cumulative_cash_flow: cumulative,
        });
    }

    ProjectionResult {
        npv: cumulative,
        schedule,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

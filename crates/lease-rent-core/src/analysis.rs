use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::development::{calculate_development_costs, DevelopmentCostBreakdown};
use crate::error::LeaseRentError;
use crate::metrics::{annual_return_pct, average_annual_rent, payback_period, total_nominal_rent};
use crate::projection::{project_rent_schedule, LeaseTerms, YearlyCashFlow};
use crate::search::{find_breakeven_rent, RENT_CEILING};
use crate::time_value::irr;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LeaseRentResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Complete lease optimization output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseAnalysisOutput {
    /// Breakeven annual rent: the feasible candidate closest to the NPV = 0
    /// boundary (within search tolerance); 0 when the project cannot break
    /// even within the horizon
    pub optimal_annual_rent: Money,
    /// NPV of the schedule at the optimal rent
    pub npv: Money,
    /// First year the cumulative discounted flow turns non-negative; None
    /// when never reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_period_years: Option<u32>,
    /// Optimal rent as an annual percentage of the development cost
    pub annual_return_pct: Percent,
    /// IRR of the nominal flow vector; None when the solver does not converge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr_pct: Option<Percent>,
    /// Sum of nominal rent over the contract
    pub total_nominal_rent: Money,
    /// Average nominal rent per contract year
    pub average_annual_rent: Money,
    /// Development cost used (derived when development_input was provided)
    pub total_development_cost: Money,
    /// Itemised cost build-up when derived from site parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_breakdown: Option<DevelopmentCostBreakdown>,
    /// Bisection iterations performed by the rent search
    pub search_iterations: u32,
    /// Year-by-year schedule at the optimal rent
    pub schedule: Vec<YearlyCashFlow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Find the breakeven rent and assemble the full analysis: resolve the
/// development cost, validate, search, and project once more at the optimum
/// for the reported schedule.
pub fn optimize_rent(
    terms: &LeaseTerms,
) -> LeaseRentResult<ComputationOutput<LeaseAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (effective, cost_breakdown) = resolve_development_cost(terms, &mut warnings)?;
    validate_terms(&effective, &mut warnings)?;

    let search = find_breakeven_rent(&effective);
    let projection = project_rent_schedule(search.optimal_rent, &effective);

    if search.optimal_rent.is_zero() {
        warnings.push(format!(
            "No rent up to the {RENT_CEILING} search ceiling nets a non-negative NPV — the \
             project does not break even within the contract horizon"
        ));
    }

    let payback = payback_period(&projection.schedule);
    if payback.is_none() && !search.optimal_rent.is_zero() {
        warnings.push("Cumulative cash flow never turns positive within the contract term".into());
    }

    let irr_pct = compute_irr(&effective, &projection.schedule, &mut warnings);

    let output = LeaseAnalysisOutput {
        optimal_annual_rent: search.optimal_rent,
        npv: projection.npv,
        payback_period_years: payback,
        annual_return_pct: annual_return_pct(
            search.optimal_rent,
            effective.total_development_cost,
        ),
        irr_pct,
        total_nominal_rent: total_nominal_rent(&projection.schedule),
        average_annual_rent: average_annual_rent(&projection.schedule),
        total_development_cost: effective.total_development_cost,
        cost_breakdown,
        search_iterations: search.iterations,
        schedule: projection.schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Breakeven Ground Rent (NPV bisection)",
        terms,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// When site parameters are supplied, the derived total overrides the
/// `total_development_cost` field.
fn resolve_development_cost(
    terms: &LeaseTerms,
    warnings: &mut Vec<String>,
) -> LeaseRentResult<(LeaseTerms, Option<DevelopmentCostBreakdown>)> {
    if let Some(ref dev_input) = terms.development_input {
        let cost_out = calculate_development_costs(dev_input)?;
        for w in &cost_out.warnings {
            warnings.push(format!("[COSTS] {w}"));
        }
        let mut effective = terms.clone();
        effective.total_development_cost = cost_out.result.total_development_cost;
        Ok((effective, Some(cost_out.result)))
    } else {
        Ok((terms.clone(), None))
    }
}

fn validate_terms(terms: &LeaseTerms, warnings: &mut Vec<String>) -> LeaseRentResult<()> {
    if terms.contract_duration_years == 0 {
        return Err(LeaseRentError::InvalidInput {
            field: "contract_duration_years".into(),
            reason: "Contract duration must be at least 1 year".into(),
        });
    }
    if terms.total_development_cost <= Decimal::ZERO {
        return Err(LeaseRentError::InvalidInput {
            field: "total_development_cost".into(),
            reason: "Development cost must be positive".into(),
        });
    }
    if terms.capitalization_rate_pct <= Decimal::ZERO {
        return Err(LeaseRentError::InvalidInput {
            field: "capitalization_rate_pct".into(),
            reason: "Capitalization rate must be positive".into(),
        });
    }
    if terms.rent_increase_interval_years == 0 {
        return Err(LeaseRentError::InvalidInput {
            field: "rent_increase_interval_years".into(),
            reason: "Escalation interval must be at least 1 year".into(),
        });
    }

    if terms.grace_period_years >= terms.contract_duration_years {
        warnings.push(format!(
            "Grace period of {} years consumes the whole {}-year contract — no rent can be charged",
            terms.grace_period_years, terms.contract_duration_years
        ));
    }
    if terms.rent_increase_rate_pct < Decimal::ZERO {
        warnings.push(format!(
            "Negative escalation rate {}% — rent shrinks at each interval",
            terms.rent_increase_rate_pct
        ));
    }

    Ok(())
}

/// IRR of the nominal flow vector `[-cost, rent_1, …, rent_n]`. Degrades to
/// None with a warning on non-convergence; skipped outright when no feasible
/// rent exists.
fn compute_irr(
    terms: &LeaseTerms,
    schedule: &[YearlyCashFlow],
    warnings: &mut Vec<String>,
) -> Option<Percent> {
    if schedule.iter().all(|cf| cf.annual_rent.is_zero()) {
        return None;
    }

    let mut flows: Vec<Money> = Vec::with_capacity(schedule.len() + 1);
    flows.push(-terms.total_development_cost);
    flows.extend(schedule.iter().map(|cf| cf.annual_rent));

    match irr(&flows, dec!(0.10)) {
        Ok(rate) => Some(rate),
        Err(_) => {
            warnings.push("IRR did not converge — omitted from results".into());
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::development::DevelopmentCostInput;
    use crate::types::Currency;
    use rust_decimal_macros::dec;

    fn sample_terms() -> LeaseTerms {
        LeaseTerms {
            contract_duration_years: 20,
            grace_period_years: 2,
            rent_increase_interval_years: 5,
            rent_increase_rate_pct: dec!(10),
            capitalization_rate_pct: dec!(7),
            total_development_cost: dec!(93480000),
            development_input: None,
            currency: Currency::SAR,
        }
    }

    fn sample_development_input() -> DevelopmentCostInput {
        DevelopmentCostInput {
            land_area_sqm: dec!(10000),
            building_factor: dec!(2.5),
            building_ratio_pct: dec!(60),
            construction_cost_per_sqm: dec!(2000),
            landscaping_cost_per_sqm: dec!(500),
            infrastructure_cost_per_sqm: dec!(3000),
            design_cost_ratio_pct: dec!(7),
            supervision_cost_ratio_pct: dec!(5),
            contingency_cost_ratio_pct: dec!(2),
        }
    }

    #[test]
    fn test_full_analysis() {
        let result = optimize_rent(&sample_terms()).unwrap();
        let out = &result.result;

        // Seven-digit breakeven rent for a 93.48M development
        assert!(out.optimal_annual_rent > dec!(1000000));
        assert!(out.optimal_annual_rent < dec!(20000000));

        // Breakeven bracket: the found rent is feasible, one tolerance step
        // lower is not, and the residual NPV is tolerance-sized
        assert!(out.npv >= Decimal::ZERO);
        assert!(out.npv < dec!(10000));
        let below = project_rent_schedule(out.optimal_annual_rent - dec!(1000), &sample_terms());
        assert!(below.npv < Decimal::ZERO);

        assert_eq!(out.schedule.len(), 20);
        assert!(out.search_iterations <= 50);

        let payback = out.payback_period_years.unwrap();
        assert!((1..=20).contains(&payback));

        assert!(out.annual_return_pct > Decimal::ZERO);
        assert!(out.total_nominal_rent > out.average_annual_rent);
        assert_eq!(out.total_development_cost, dec!(93480000));
        assert!(out.cost_breakdown.is_none());
    }

    #[test]
    fn test_irr_near_cap_rate_at_breakeven() {
        let result = optimize_rent(&sample_terms()).unwrap();
        // At breakeven the NPV at the 7% cap rate is ~0, so the IRR of the
        // nominal flows sits close to 7%
        let irr = result.result.irr_pct.unwrap();
        assert!(irr > dec!(5) && irr < dec!(10), "IRR {irr} out of range");
    }

    #[test]
    fn test_grace_consuming_contract() {
        let mut terms = sample_terms();
        terms.grace_period_years = 20;

        let result = optimize_rent(&terms).unwrap();
        let out = &result.result;

        assert_eq!(out.optimal_annual_rent, Decimal::ZERO);
        assert_eq!(out.npv, -terms.total_development_cost);
        assert_eq!(out.payback_period_years, None);
        assert_eq!(out.annual_return_pct, Decimal::ZERO);
        assert_eq!(out.irr_pct, None);

        assert!(result.warnings.iter().any(|w| w.contains("Grace period")));
        assert!(result.warnings.iter().any(|w| w.contains("break even")));
    }

    #[test]
    fn test_derived_development_cost_overrides_field() {
        let mut terms = sample_terms();
        terms.total_development_cost = dec!(1);
        terms.development_input = Some(sample_development_input());

        let result = optimize_rent(&terms).unwrap();
        let out = &result.result;

        assert_eq!(out.total_development_cost, dec!(93480000));
        let breakdown = out.cost_breakdown.as_ref().unwrap();
        assert_eq!(breakdown.basic_costs, dec!(82000000));

        // Same answer as supplying the total directly
        let direct = optimize_rent(&sample_terms()).unwrap();
        assert_eq!(out.optimal_annual_rent, direct.result.optimal_annual_rent);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut terms = sample_terms();
        terms.contract_duration_years = 0;

        match optimize_rent(&terms).unwrap_err() {
            LeaseRentError::InvalidInput { field, .. } => {
                assert_eq!(field, "contract_duration_years");
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_cost_rejected() {
        let mut terms = sample_terms();
        terms.total_development_cost = Decimal::ZERO;
        assert!(optimize_rent(&terms).is_err());

        terms.total_development_cost = dec!(-5);
        assert!(optimize_rent(&terms).is_err());
    }

    #[test]
    fn test_zero_cap_rate_rejected() {
        let mut terms = sample_terms();
        terms.capitalization_rate_pct = Decimal::ZERO;
        assert!(optimize_rent(&terms).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut terms = sample_terms();
        terms.rent_increase_interval_years = 0;
        assert!(optimize_rent(&terms).is_err());
    }

    #[test]
    fn test_negative_escalation_warns_but_computes() {
        let mut terms = sample_terms();
        terms.rent_increase_rate_pct = dec!(-10);

        let result = optimize_rent(&terms).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("Negative escalation")));
        assert!(result.result.optimal_annual_rent > Decimal::ZERO);
    }

    #[test]
    fn test_cost_beyond_ceiling_reports_no_breakeven() {
        let mut terms = sample_terms();
        // Not even the 50M rent ceiling carries a 1B development
        terms.total_development_cost = dec!(1000000000);

        let result = optimize_rent(&terms).unwrap();
        let out = &result.result;

        assert_eq!(out.optimal_annual_rent, Decimal::ZERO);
        assert_eq!(out.npv, -terms.total_development_cost);
        assert_eq!(out.payback_period_years, None);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("search ceiling")));
    }

    #[test]
    fn test_methodology() {
        let result = optimize_rent(&sample_terms()).unwrap();
        assert_eq!(result.methodology, "Breakeven Ground Rent (NPV bisection)");
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::projection::{project_rent_schedule, LeaseTerms};
use crate::types::Money;

/// Practical ceiling on annual rent candidates. A fixed constant, not derived
/// from the inputs.
pub const RENT_CEILING: Decimal = dec!(50000000);

/// Absolute currency-unit precision floor for the bisection.
pub const RENT_TOLERANCE: Decimal = dec!(1000);

/// Safety bound only; the interval halves each step and converges long before
/// this for the fixed ceiling and tolerance.
pub const MAX_SEARCH_ITERATIONS: u32 = 50;

/// Result of the breakeven-rent bisection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentSearch {
    /// Breakeven rent within tolerance: the feasible candidate closest to the
    /// NPV = 0 boundary. 0 when no candidate up to the ceiling nets a
    /// non-negative NPV.
    pub optimal_rent: Money,
    /// NPV of the schedule at `optimal_rent`
    pub npv_at_optimal: Money,
    /// Bisection iterations performed
    pub iterations: u32,
}

/// Locate the rent at which the project NPV crosses zero.
///
/// NPV is monotonically non-decreasing in the base rent, so the feasible
/// candidates form an upper interval and bisection brackets its boundary:
/// a feasible midpoint becomes the recorded answer and the new upper end,
/// an infeasible one raises the lower end. Assumes validated terms (see
/// `analysis`).
pub fn find_breakeven_rent(terms: &LeaseTerms) -> RentSearch {
    let mut low = Decimal::ZERO;
    let mut high = RENT_CEILING;
    let mut optimal_rent = Decimal::ZERO;
    // project(0).npv is -total_development_cost for any terms
    let mut npv_at_optimal = -terms.total_development_cost;
    let mut iterations = 0;

    while high - low > RENT_TOLERANCE && iterations < MAX_SEARCH_ITERATIONS {
        let mid = ((low + high) / dec!(2)).floor();
        let npv = project_rent_schedule(mid, terms).npv;

        if npv >= Decimal::ZERO {
            optimal_rent = mid;
            npv_at_optimal = npv;
            high = mid;
        } else {
            low = mid;
        }

        iterations += 1;
    }

    RentSearch {
        optimal_rent,
        npv_at_optimal,
        iterations,
    }
}

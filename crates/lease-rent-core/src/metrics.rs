use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::projection::YearlyCashFlow;
use crate::types::{Money, Percent};

/// First contract year at which the cumulative discounted cash flow turns
/// non-negative. `None` means the investment is never recovered within the
/// horizon.
pub fn payback_period(schedule: &[YearlyCashFlow]) -> Option<u32> {
    schedule
        .iter()
        .find(|cf| cf.cumulative_cash_flow >= Decimal::ZERO)
        .map(|cf| cf.year)
}

/// Optimal rent as a simple annual percentage of the development cost.
/// Defined as 0 for a zero cost.
pub fn annual_return_pct(optimal_rent: Money, total_development_cost: Money) -> Percent {
    if total_development_cost.is_zero() {
        return Decimal::ZERO;
    }
    optimal_rent / total_development_cost * dec!(100)
}

/// Sum of nominal (undiscounted) rent over the whole schedule.
pub fn total_nominal_rent(schedule: &[YearlyCashFlow]) -> Money {
    schedule.iter().map(|cf| cf.annual_rent).sum()
}

/// Average nominal rent per contract year; 0 for an empty schedule.
pub fn average_annual_rent(schedule: &[YearlyCashFlow]) -> Money {
    if schedule.is_empty() {
        return Decimal::ZERO;
    }
    total_nominal_rent(schedule) / Decimal::from(schedule.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(year: u32, rent: Decimal, cumulative: Decimal) -> YearlyCashFlow {
        YearlyCashFlow {
            year,
            annual_rent: rent,
            escalation_rate_pct: Decimal::ZERO,
            discounted_cash_flow: rent,
            cumulative_cash_flow: cumulative,
        }
    }

    #[test]
    fn test_payback_first_non_negative_year() {
        let schedule = vec![
            row(1, dec!(0), dec!(-100)),
            row(2, dec!(60), dec!(-40)),
            row(3, dec!(60), dec!(20)),
            row(4, dec!(60), dec!(80)),
        ];
        assert_eq!(payback_period(&schedule), Some(3));
    }

    #[test]
    fn test_payback_exact_zero_counts() {
        let schedule = vec![row(1, dec!(50), dec!(-50)), row(2, dec!(50), dec!(0))];
        assert_eq!(payback_period(&schedule), Some(2));
    }

    #[test]
    fn test_payback_never_reached() {
        let schedule = vec![row(1, dec!(10), dec!(-90)), row(2, dec!(10), dec!(-80))];
        assert_eq!(payback_period(&schedule), None);
    }

    #[test]
    fn test_annual_return() {
        assert_eq!(annual_return_pct(dec!(9000000), dec!(90000000)), dec!(10));
        assert_eq!(annual_return_pct(dec!(9000000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_nominal_totals() {
        let schedule = vec![
            row(1, dec!(0), dec!(-100)),
            row(2, dec!(100), dec!(0)),
            row(3, dec!(110), dec!(110)),
        ];
        assert_eq!(total_nominal_rent(&schedule), dec!(210));
        assert_eq!(average_annual_rent(&schedule), dec!(70));
        assert_eq!(average_annual_rent(&[]), Decimal::ZERO);
    }
}

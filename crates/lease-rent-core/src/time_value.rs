use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LeaseRentError;
use crate::types::{Money, Percent};
use crate::LeaseRentResult;

const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const MAX_IRR_ITERATIONS: u32 = 100;

/// Net Present Value of a series of cash flows. `rate` is a decimal fraction
/// (0.07 = 7%); index 0 is the undiscounted time-zero flow.
pub fn npv(rate: Decimal, cash_flows: &[Money]) -> LeaseRentResult<Money> {
    if rate <= dec!(-1) {
        return Err(LeaseRentError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        if discount.is_zero() {
            return Err(LeaseRentError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result += cf / discount;
    }

    Ok(result)
}

/// Internal Rate of Return using Newton-Raphson. Returns a percentage
/// (10 = 10%) to match the rest of the lease inputs.
pub fn irr(cash_flows: &[Money], guess: Decimal) -> LeaseRentResult<Percent> {
    if cash_flows.len() < 2 {
        return Err(LeaseRentError::InsufficientData(
            "IRR requires at least 2 cash flows".into(),
        ));
    }

    let mut rate = guess;
    let mut last_npv = Decimal::ZERO;

    for i in 0..MAX_IRR_ITERATIONS {
        let mut npv_val = Decimal::ZERO;
        let mut dnpv = Decimal::ZERO;
        let one_plus_r = Decimal::ONE + rate;

        for (t, cf) in cash_flows.iter().enumerate() {
            let t_dec = Decimal::from(t as i64);
            let discount = match one_plus_r.checked_powd(t_dec) {
                Some(d) if !d.is_zero() => d,
                _ => {
                    return Err(LeaseRentError::ConvergenceFailure {
                        function: "IRR".into(),
                        iterations: i,
                        last_delta: last_npv,
                    });
                }
            };
            npv_val += cf / discount;
            if t > 0 {
                let next_discount = match discount.checked_mul(one_plus_r) {
                    Some(d) if !d.is_zero() => d,
                    _ => {
                        return Err(LeaseRentError::ConvergenceFailure {
                            function: "IRR".into(),
                            iterations: i,
                            last_delta: last_npv,
                        });
                    }
                };
                dnpv -= t_dec * cf / next_discount;
            }
        }

        last_npv = npv_val;

        if npv_val.abs() < CONVERGENCE_THRESHOLD {
            return Ok(rate * dec!(100));
        }

        if dnpv.is_zero() {
            return Err(LeaseRentError::ConvergenceFailure {
                function: "IRR".into(),
                iterations: i,
                last_delta: npv_val,
            });
        }

        rate -= npv_val / dnpv;

        // Guard against divergence
        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(10.0) {
            rate = dec!(10.0);
        }
    }

    Err(LeaseRentError::ConvergenceFailure {
        function: "IRR".into(),
        iterations: MAX_IRR_ITERATIONS,
        last_delta: last_npv,
    })
}

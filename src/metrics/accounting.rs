//! Accounting Rate of Return
//!
//! ARR is returned as a fraction (0.12 = 12%) so it compares directly against
//! the target rate. Average investment assumes straight-line depreciation to
//! zero salvage: `|initial_cost| / 2`.

use crate::config::ArrBasis;
use crate::error::{EngineError, Result};

/// Average book investment over the holding period
pub fn average_investment(initial_cost: f64) -> f64 {
    initial_cost.abs() / 2.0
}

/// ARR on the gross basis: mean of the post-investment flows over average investment
pub fn arr(initial_cost: f64, flows_after_period_0: &[f64]) -> Result<f64> {
    arr_with_basis(initial_cost, flows_after_period_0, ArrBasis::Gross)
}

/// ARR on the chosen profit basis.
///
/// `NetOfDepreciation` deducts the full initial cost from total inflows before
/// averaging.
pub fn arr_with_basis(initial_cost: f64, flows_after_period_0: &[f64], basis: ArrBasis) -> Result<f64> {
    if !initial_cost.is_finite() || initial_cost == 0.0 {
        return Err(EngineError::InvalidInitialCost {
            reason: format!("initial cost must be non-zero and finite, got {initial_cost}"),
        });
    }
    let periods = flows_after_period_0.len();
    if periods == 0 {
        return Err(EngineError::InvalidInitialCost {
            reason: "no post-investment periods".to_string(),
        });
    }

    let total: f64 = flows_after_period_0.iter().sum();
    let profit = match basis {
        ArrBasis::Gross => total,
        ArrBasis::NetOfDepreciation => total - initial_cost.abs(),
    };
    let avg_profit = profit / periods as f64;

    Ok(avg_profit / average_investment(initial_cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gross_arr() {
        // avg profit 300, avg investment 500
        let value = arr(1000.0, &[300.0; 5]).unwrap();
        assert_abs_diff_eq!(value, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_net_of_depreciation() {
        // (1500 - 1000) / 5 = 100 over 500
        let value = arr_with_basis(1000.0, &[300.0; 5], ArrBasis::NetOfDepreciation).unwrap();
        assert_abs_diff_eq!(value, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_sign_of_cost_ignored() {
        let a = arr(1000.0, &[100.0, 200.0]).unwrap();
        let b = arr(-1000.0, &[100.0, 200.0]).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_cost_rejected() {
        assert!(matches!(arr(0.0, &[100.0]), Err(EngineError::InvalidInitialCost { .. })));
    }

    #[test]
    fn test_no_periods_rejected() {
        assert!(matches!(arr(1000.0, &[]), Err(EngineError::InvalidInitialCost { .. })));
    }
}

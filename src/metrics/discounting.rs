//! Net Present Value

use crate::error::{EngineError, Result};

/// Discount factor `1 / (1 + rate)^t`
pub fn discount_factor(rate: f64, period: usize) -> f64 {
    1.0 / (1.0 + rate).powi(period as i32)
}

/// Net present value of `flows` at `rate`, period 0 undiscounted.
///
/// Sums in ascending period order. Fails with `InvalidRate` when the rate is
/// not finite or is at or below -100%.
pub fn npv(rate: f64, flows: &[f64]) -> Result<f64> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(EngineError::InvalidRate { rate });
    }
    Ok(flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf * discount_factor(rate, t))
        .sum())
}

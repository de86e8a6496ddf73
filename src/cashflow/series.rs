//! Validated cash flow series

use crate::error::ValidationError;

/// Ordered periodic net cash flows, period 0 being the initial outlay.
///
/// Construction enforces at least two periods and finite values; the flows
/// cannot be mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CashflowSeries {
    flows: Vec<f64>,
}

impl CashflowSeries {
    /// Build a series from a full flow vector (period 0 included)
    pub fn new(flows: Vec<f64>) -> Result<Self, ValidationError> {
        if flows.is_empty() {
            return Err(ValidationError::EmptyCashflows);
        }
        if flows.len() < 2 {
            return Err(ValidationError::TooShort { len: flows.len() });
        }
        if let Some(&bad) = flows.iter().find(|cf| !cf.is_finite()) {
            return Err(ValidationError::NotFinite { field: "cash flow", value: bad });
        }
        Ok(Self { flows })
    }

    /// Build a series as `[-initial_cost] + periodic`
    pub fn from_initial_cost(initial_cost: f64, periodic: &[f64]) -> Result<Self, ValidationError> {
        if periodic.is_empty() {
            return Err(ValidationError::EmptyCashflows);
        }
        if !initial_cost.is_finite() {
            return Err(ValidationError::NotFinite { field: "initial cost", value: initial_cost });
        }
        let mut flows = Vec::with_capacity(periodic.len() + 1);
        flows.push(-initial_cost);
        flows.extend_from_slice(periodic);
        Self::new(flows)
    }

    /// All flows, period 0 first
    pub fn flows(&self) -> &[f64] {
        &self.flows
    }

    /// Flow at period 0
    pub fn initial_outlay(&self) -> f64 {
        self.flows[0]
    }

    /// Initial cost as a positive-for-outlay amount (`-flows[0]`)
    pub fn initial_cost(&self) -> f64 {
        -self.flows[0]
    }

    /// Flows after period 0
    pub fn periodic(&self) -> &[f64] {
        &self.flows[1..]
    }

    /// Number of post-investment periods
    pub fn periods(&self) -> usize {
        self.flows.len() - 1
    }

    /// True if the series contains both a strictly positive and a strictly negative flow
    pub fn has_sign_change(&self) -> bool {
        has_sign_change(&self.flows)
    }
}

/// True if `flows` contains both a strictly positive and a strictly negative value
pub fn has_sign_change(flows: &[f64]) -> bool {
    let has_positive = flows.iter().any(|&cf| cf > 0.0);
    let has_negative = flows.iter().any(|&cf| cf < 0.0);
    has_positive && has_negative
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_initial_cost_prepends_outlay() {
        let series = CashflowSeries::from_initial_cost(1000.0, &[300.0, 300.0]).unwrap();
        assert_eq!(series.flows(), &[-1000.0, 300.0, 300.0]);
        assert_eq!(series.periods(), 2);
        assert!((series.initial_cost() - 1000.0).abs() < 1e-12);
        assert!((series.initial_outlay() + 1000.0).abs() < 1e-12);
        assert!(series.has_sign_change());
    }

    #[test]
    fn test_rejects_single_flow() {
        assert_eq!(
            CashflowSeries::new(vec![-100.0]),
            Err(ValidationError::TooShort { len: 1 })
        );
    }

    #[test]
    fn test_rejects_empty_periodic() {
        assert_eq!(
            CashflowSeries::from_initial_cost(100.0, &[]),
            Err(ValidationError::EmptyCashflows)
        );
    }

    #[test]
    fn test_rejects_nan() {
        assert!(CashflowSeries::new(vec![-100.0, f64::NAN]).is_err());
        assert!(CashflowSeries::from_initial_cost(f64::INFINITY, &[1.0]).is_err());
    }

    #[test]
    fn test_sign_change_detection() {
        assert!(has_sign_change(&[-1000.0, 600.0]));
        assert!(!has_sign_change(&[-1000.0, -200.0, -300.0]));
        assert!(!has_sign_change(&[0.0, 100.0, 100.0]));
        assert!(!has_sign_change(&[0.0, 0.0]));
    }
}

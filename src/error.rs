//! Error taxonomy for the capital budgeting engine
//!
//! Boundary problems surface as `ValidationError` before any metric runs.
//! Engine failures (`InvalidRate`, `InvalidInitialCost`) name the metric that
//! could not be computed. An undefined IRR is not an error: it travels as an
//! absent value with a `DegenerateSeries` reason attached.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Malformed or missing input caught at the request boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("cash flows must contain at least one value")]
    EmptyCashflows,

    #[error("cash flow entry {index} ('{raw}') is not a number")]
    NotANumber { index: usize, raw: String },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("a cash flow series needs at least 2 periods, got {len}")]
    TooShort { len: usize },

    #[error("target rate must be greater than -100%, got {rate}")]
    RateOutOfRange { rate: f64 },
}

/// Errors raised while computing metrics.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Discounting is undefined at or below -100%.
    #[error("NPV could not be computed: discount rate {rate} must be finite and greater than -1")]
    InvalidRate { rate: f64 },

    /// ARR needs a non-zero initial cost and at least one post-investment period.
    #[error("ARR could not be computed: {reason}")]
    InvalidInitialCost { reason: String },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a series has no IRR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateSeries {
    /// Fewer than two flows, so no investment period exists
    TooFewFlows,
    /// Every flow has the same sign (or is zero)
    NoSignChange,
    /// The polynomial has no real, strictly positive root
    NoRealPositiveRoot,
    /// Eigen-decomposition of the companion matrix did not converge
    Singular,
}

impl DegenerateSeries {
    /// Human-readable reason used in guidance text
    pub fn reason(&self) -> &'static str {
        match self {
            DegenerateSeries::TooFewFlows => "the series has fewer than two periods",
            DegenerateSeries::NoSignChange => {
                "the cash flows never change sign (only outflows or only inflows)"
            }
            DegenerateSeries::NoRealPositiveRoot => "no real discount rate sets the NPV to zero",
            DegenerateSeries::Singular => "the IRR polynomial is numerically singular",
        }
    }
}

impl std::fmt::Display for DegenerateSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rate_names_metric() {
        let err = EngineError::InvalidRate { rate: -1.0 };
        let msg = format!("{err}");
        assert!(msg.contains("NPV"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_validation_converts_into_engine_error() {
        let err: EngineError = ValidationError::EmptyCashflows.into();
        match err {
            EngineError::Validation(ValidationError::EmptyCashflows) => {}
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_not_a_number_message() {
        let err = ValidationError::NotANumber { index: 2, raw: "abc".into() };
        assert!(format!("{err}").contains("'abc'"));
    }

    #[test]
    fn test_degenerate_reason_display() {
        assert!(DegenerateSeries::NoSignChange.to_string().contains("sign"));
    }

    #[test]
    fn test_engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }
}

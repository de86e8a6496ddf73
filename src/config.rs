//! Engine configuration
//!
//! Policy constants that are heuristics rather than business rules live here
//! so callers can tune them without touching the calculators.

use serde::{Deserialize, Serialize};
use std::env;

/// Default margin added on top of a metric gap when quoting guidance (one percentage point)
pub const DEFAULT_RECOMMENDATION_BUFFER: f64 = 0.01;

/// Default relative tolerance on the imaginary part of a polynomial root
pub const DEFAULT_IMAGINARY_TOLERANCE: f64 = 1e-6;

/// Default relative tolerance for treating two NPVs as tied
pub const DEFAULT_NPV_TIE_TOLERANCE: f64 = 1e-9;

/// Default iteration cap for the Schur decomposition
pub const DEFAULT_MAX_EIGEN_ITERATIONS: usize = 10_000;

/// How average accounting profit is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrBasis {
    /// Average of the periodic flows after period 0
    #[default]
    Gross,
    /// Periodic flows less straight-line depreciation of the initial cost
    NetOfDepreciation,
}

impl ArrBasis {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gross" => Some(ArrBasis::Gross),
            "net" | "net_of_depreciation" | "netofdepreciation" => {
                Some(ArrBasis::NetOfDepreciation)
            }
            _ => None,
        }
    }
}

/// Tunable constants for the metrics engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Margin added to IRR/ARR gaps so guidance never lands exactly on the boundary
    pub recommendation_buffer: f64,

    /// A root is treated as real when |im| <= tolerance * max(1, |re|)
    pub imaginary_tolerance: f64,

    /// Two NPVs tie when |a - b| <= tolerance * max(1, |a|, |b|)
    pub npv_tie_tolerance: f64,

    /// Iteration cap for the companion-matrix eigen-decomposition
    pub max_eigen_iterations: usize,

    /// ARR profit basis
    pub arr_basis: ArrBasis,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recommendation_buffer: DEFAULT_RECOMMENDATION_BUFFER,
            imaginary_tolerance: DEFAULT_IMAGINARY_TOLERANCE,
            npv_tie_tolerance: DEFAULT_NPV_TIE_TOLERANCE,
            max_eigen_iterations: DEFAULT_MAX_EIGEN_ITERATIONS,
            arr_basis: ArrBasis::Gross,
        }
    }
}

impl EngineConfig {
    /// Build a config from `CB_*` environment variables, falling back to defaults
    /// for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let recommendation_buffer = env::var("CB_RECOMMENDATION_BUFFER")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.recommendation_buffer);

        let imaginary_tolerance = env::var("CB_IMAGINARY_TOLERANCE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.imaginary_tolerance);

        let npv_tie_tolerance = env::var("CB_NPV_TIE_TOLERANCE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.npv_tie_tolerance);

        let max_eigen_iterations = env::var("CB_MAX_EIGEN_ITERATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_eigen_iterations);

        let arr_basis = env::var("CB_ARR_BASIS")
            .ok()
            .and_then(|s| ArrBasis::parse(&s))
            .unwrap_or(defaults.arr_basis);

        Self {
            recommendation_buffer,
            imaginary_tolerance,
            npv_tie_tolerance,
            max_eigen_iterations,
            arr_basis,
        }
    }

    /// Set the ARR basis
    pub fn with_arr_basis(mut self, basis: ArrBasis) -> Self {
        self.arr_basis = basis;
        self
    }

    /// Set the recommendation buffer
    pub fn with_buffer(mut self, buffer: f64) -> Self {
        self.recommendation_buffer = buffer;
        self
    }
}

//! Internal Rate of Return (IRR) calculation
//!
//! With `x = 1 / (1 + r)` the NPV becomes the polynomial `Σ flows[t] * x^t`.
//! All of its roots come from the eigenvalues of the companion matrix, so
//! series with several sign changes are handled without seeding an iterative
//! solver. Real, strictly positive roots map back to candidate rates.

use crate::cashflow::has_sign_change;
use crate::config::{EngineConfig, DEFAULT_IMAGINARY_TOLERANCE, DEFAULT_MAX_EIGEN_ITERATIONS};
use crate::error::DegenerateSeries;
use nalgebra::linalg::Schur;
use nalgebra::{Complex, DMatrix};
use serde::{Deserialize, Serialize};

/// A solved IRR with every candidate rate that zeroes the NPV
#[derive(Debug, Clone, PartialEq)]
pub struct IrrSolution {
    /// Canonical rate: the candidate closest to zero
    pub rate: f64,
    /// All distinct candidate rates, ascending
    pub candidates: Vec<f64>,
}

impl IrrSolution {
    /// False when the series has more than one IRR
    pub fn is_unique(&self) -> bool {
        self.candidates.len() == 1
    }
}

/// Serializable summary of how the IRR came out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IrrStatus {
    Unique,
    Multiple { candidates: Vec<f64> },
    Undefined { reason: DegenerateSeries },
}

impl IrrStatus {
    pub fn from_outcome(outcome: &Result<IrrSolution, DegenerateSeries>) -> Self {
        match outcome {
            Ok(solution) if solution.is_unique() => IrrStatus::Unique,
            Ok(solution) => IrrStatus::Multiple { candidates: solution.candidates.clone() },
            Err(reason) => IrrStatus::Undefined { reason: *reason },
        }
    }

    /// Reason the IRR is absent, if it is
    pub fn undefined_reason(&self) -> Option<DegenerateSeries> {
        match self {
            IrrStatus::Undefined { reason } => Some(*reason),
            _ => None,
        }
    }
}

/// Companion-matrix IRR solver
#[derive(Debug, Clone, Copy)]
pub struct IrrSolver {
    /// A root is real when |im| <= tolerance * max(1, |re|)
    pub imaginary_tolerance: f64,
    /// Iteration cap for the Schur decomposition
    pub max_iterations: usize,
}

impl Default for IrrSolver {
    fn default() -> Self {
        Self {
            imaginary_tolerance: DEFAULT_IMAGINARY_TOLERANCE,
            max_iterations: DEFAULT_MAX_EIGEN_ITERATIONS,
        }
    }
}

impl IrrSolver {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            imaginary_tolerance: config.imaginary_tolerance,
            max_iterations: config.max_eigen_iterations,
        }
    }

    /// Solve for every IRR of `flows` and pick the canonical one.
    ///
    /// Never panics: degenerate or numerically singular input comes back as
    /// `Err(DegenerateSeries)`.
    pub fn solve(&self, flows: &[f64]) -> Result<IrrSolution, DegenerateSeries> {
        if flows.len() < 2 {
            return Err(DegenerateSeries::TooFewFlows);
        }
        if !has_sign_change(flows) {
            return Err(DegenerateSeries::NoSignChange);
        }

        // Zero low-order coefficients are roots at x = 0 and zero high-order
        // coefficients lower the degree; neither yields a rate.
        let first = flows
            .iter()
            .position(|&cf| cf != 0.0)
            .ok_or(DegenerateSeries::NoSignChange)?;
        let last = flows
            .iter()
            .rposition(|&cf| cf != 0.0)
            .ok_or(DegenerateSeries::NoSignChange)?;
        let coeffs = &flows[first..=last];

        let roots = self.polynomial_roots(coeffs)?;

        let mut candidates: Vec<f64> = roots
            .iter()
            .filter(|z| z.im.abs() <= self.imaginary_tolerance * z.re.abs().max(1.0))
            .map(|z| z.re)
            .filter(|&x| x > 0.0)
            .map(|x| 1.0 / x - 1.0)
            .filter(|r| r.is_finite())
            .collect();

        candidates.sort_by(|a, b| a.total_cmp(b));
        let tol = self.imaginary_tolerance;
        candidates.dedup_by(|a, b| (*a - *b).abs() <= tol * a.abs().max(1.0));

        // Distances to zero within the merge tolerance tie; the smaller rate wins
        let rate = candidates
            .iter()
            .copied()
            .min_by(|a, b| {
                let (da, db) = (a.abs(), b.abs());
                if (da - db).abs() <= tol * da.max(db).max(1.0) {
                    a.total_cmp(b)
                } else {
                    da.total_cmp(&db)
                }
            })
            .ok_or(DegenerateSeries::NoRealPositiveRoot)?;

        if candidates.len() > 1 {
            log::debug!("multiple IRR candidates {:?}, selected {}", candidates, rate);
        } else {
            log::debug!("IRR solved: {}", rate);
        }

        Ok(IrrSolution { rate, candidates })
    }

    /// Roots of `Σ coeffs[t] * x^t`; the first and last coefficients must be non-zero
    fn polynomial_roots(&self, coeffs: &[f64]) -> Result<Vec<Complex<f64>>, DegenerateSeries> {
        let degree = coeffs.len() - 1;
        if degree == 0 {
            return Err(DegenerateSeries::NoRealPositiveRoot);
        }

        let lead = coeffs[degree];
        if degree == 1 {
            return Ok(vec![Complex::new(-coeffs[0] / lead, 0.0)]);
        }

        // Frobenius companion matrix: ones on the subdiagonal, last column
        // holds the negated monic coefficients.
        let companion = DMatrix::<f64>::from_fn(degree, degree, |i, j| {
            if j == degree - 1 {
                -coeffs[i] / lead
            } else if i == j + 1 {
                1.0
            } else {
                0.0
            }
        });

        if companion.iter().any(|v| !v.is_finite()) {
            log::warn!("companion matrix has non-finite entries");
            return Err(DegenerateSeries::Singular);
        }

        let schur = match Schur::try_new(companion, f64::EPSILON, self.max_iterations) {
            Some(schur) => schur,
            None => {
                log::warn!(
                    "Schur decomposition did not converge within {} iterations (degree {})",
                    self.max_iterations,
                    degree
                );
                return Err(DegenerateSeries::Singular);
            }
        };

        let roots: Vec<Complex<f64>> = schur.complex_eigenvalues().iter().copied().collect();
        if roots.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
            return Err(DegenerateSeries::Singular);
        }
        Ok(roots)
    }
}

/// IRR of `flows` with default solver settings, `None` when undefined
pub fn irr(flows: &[f64]) -> Option<f64> {
    IrrSolver::default().solve(flows).ok().map(|s| s.rate)
}

//! Capital Budgeting - investment appraisal engine for periodic cash flow projects
//!
//! This library provides:
//! - Net Present Value, Internal Rate of Return and Accounting Rate of Return
//! - IRR via companion-matrix eigenvalues (handles multiple sign changes)
//! - A conjunctive accept/reject decision against a target rate
//! - Quantified guidance for failing criteria and two-project comparison
//! - Batch evaluation from CSV

pub mod error;
pub mod config;
pub mod cashflow;
pub mod metrics;
pub mod decision;
pub mod evaluation;

// Re-export commonly used types
pub use error::{DegenerateSeries, EngineError, Result, ValidationError};
pub use config::{ArrBasis, EngineConfig};
pub use cashflow::{parse_cashflows, CashflowSeries};
pub use metrics::{arr, irr, npv, IrrSolver, IrrStatus, MetricResult, RateUnit};
pub use decision::{Decision, DecisionEngine, Recommendation, RecommendationGenerator};
pub use evaluation::{
    ComparisonReport, ComparisonRequest, EvaluationReport, EvaluationRequest, Evaluator,
    ProjectInput,
};

//! Request/response boundary for evaluations
//!
//! Requests are validated here before any metric runs. The `Evaluator` holds
//! the engine config once and can evaluate single projects, comparisons or
//! whole batches.

use crate::cashflow::CashflowSeries;
use crate::config::{ArrBasis, EngineConfig};
use crate::decision::{
    Comparison, CriteriaCheck, Decision, DecisionEngine, Preference, RecommendationGenerator,
};
use crate::error::{Result, ValidationError};
use crate::metrics::{IrrStatus, MetricResult, RateUnit};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Input for a single project evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Up-front investment; the series starts with `-initial_cost`
    pub initial_cost: f64,

    /// Net cash flows for periods 1..N
    pub cashflows: Vec<f64>,

    /// Target (hurdle) rate as a fraction, e.g. 0.10
    pub target_rate: f64,

    /// Informational only; no calculation uses it
    #[serde(default)]
    pub holding_period_years: Option<u32>,
}

impl EvaluationRequest {
    pub fn new(initial_cost: f64, cashflows: Vec<f64>, target_rate: f64) -> Self {
        Self {
            initial_cost,
            cashflows,
            target_rate,
            holding_period_years: None,
        }
    }

    /// Reject malformed input before it reaches the engine
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.cashflows.is_empty() {
            return Err(ValidationError::EmptyCashflows);
        }
        if let Some(&bad) = self.cashflows.iter().find(|cf| !cf.is_finite()) {
            return Err(ValidationError::NotFinite { field: "cash flow", value: bad });
        }
        if !self.initial_cost.is_finite() {
            return Err(ValidationError::NotFinite { field: "initial cost", value: self.initial_cost });
        }
        validate_target_rate(self.target_rate)
    }

    /// Build the full series (`[-initial_cost] + cashflows`)
    pub fn series(&self) -> std::result::Result<CashflowSeries, ValidationError> {
        self.validate()?;
        CashflowSeries::from_initial_cost(self.initial_cost, &self.cashflows)
    }
}

fn validate_target_rate(rate: f64) -> std::result::Result<(), ValidationError> {
    if !rate.is_finite() {
        return Err(ValidationError::NotFinite { field: "target rate", value: rate });
    }
    if rate <= -1.0 {
        return Err(ValidationError::RateOutOfRange { rate });
    }
    Ok(())
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    #[serde(default)]
    pub label: Option<String>,
    pub initial_cost: f64,
    pub cashflows: Vec<f64>,
    #[serde(default)]
    pub holding_period_years: Option<u32>,
}

impl ProjectInput {
    fn to_request(&self, target_rate: f64) -> EvaluationRequest {
        EvaluationRequest {
            initial_cost: self.initial_cost,
            cashflows: self.cashflows.clone(),
            target_rate,
            holding_period_years: self.holding_period_years,
        }
    }
}

/// Two projects evaluated against one target rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub project_a: ProjectInput,
    pub project_b: ProjectInput,
    pub target_rate: f64,
}

/// Presentation record for one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// NPV rounded to 2 places
    pub npv: f64,
    /// IRR in percent, rounded to 2 places; `None` when undefined
    pub irr_pct: Option<f64>,
    /// ARR in percent, rounded to 2 places
    pub arr_pct: f64,
    pub arr_unit: RateUnit,
    pub arr_basis: ArrBasis,
    pub irr_status: IrrStatus,
    pub decision: Decision,
    pub decision_label: String,
    pub criteria: CriteriaCheck,
    pub target_rate: f64,
    pub recommendations: Vec<String>,
    pub holding_period_years: Option<u32>,
    /// Unrounded values the decision was made on
    pub metrics: MetricResult,
}

/// Presentation record for a two-project comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub project_a: EvaluationReport,
    pub project_b: EvaluationReport,
    pub preferred: Preference,
    pub comparison: String,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Evaluates projects with a fixed engine configuration
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EngineConfig,
}

impl Evaluator {
    /// Evaluator with default config
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Validate and evaluate one request
    pub fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationReport> {
        let series = request.series()?;

        if let Some(years) = request.holding_period_years {
            if years as usize != series.periods() {
                log::warn!(
                    "holding period of {} years differs from {} cash flow periods (informational only)",
                    years,
                    series.periods()
                );
            }
        }

        self.evaluate_series(&series, request.target_rate, request.holding_period_years)
    }

    /// Evaluate an already validated series
    pub fn evaluate_series(
        &self,
        series: &CashflowSeries,
        target_rate: f64,
        holding_period_years: Option<u32>,
    ) -> Result<EvaluationReport> {
        validate_target_rate(target_rate)?;

        let metrics = MetricResult::compute(series, target_rate, &self.config)?;
        let decision = DecisionEngine::decide_metrics(&metrics, target_rate);
        let criteria = CriteriaCheck::evaluate(metrics.npv, metrics.irr, metrics.arr, target_rate);
        let recommendations = RecommendationGenerator::from_config(&self.config)
            .recommend_metrics(&metrics, target_rate)
            .into_iter()
            .map(|r| r.message)
            .collect();

        log::debug!(
            "evaluated {} periods at {}: npv={:.4} irr={:?} arr={:.4} -> {:?}",
            series.periods(),
            target_rate,
            metrics.npv,
            metrics.irr,
            metrics.arr,
            decision
        );

        Ok(EvaluationReport {
            npv: round2(metrics.npv),
            irr_pct: metrics.irr.map(|r| round2(r * 100.0)),
            arr_pct: round2(metrics.arr * 100.0),
            arr_unit: RateUnit::Percent,
            arr_basis: metrics.arr_basis,
            irr_status: metrics.irr_status.clone(),
            decision,
            decision_label: decision.label().to_string(),
            criteria,
            target_rate,
            recommendations,
            holding_period_years,
            metrics,
        })
    }

    /// Evaluate both projects and name the one with the higher NPV
    pub fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonReport> {
        let report_a = self.evaluate(&request.project_a.to_request(request.target_rate))?;
        let report_b = self.evaluate(&request.project_b.to_request(request.target_rate))?;

        let label_a = request.project_a.label.as_deref().unwrap_or("Project A");
        let label_b = request.project_b.label.as_deref().unwrap_or("Project B");

        let Comparison { preferred, message } = RecommendationGenerator::from_config(&self.config)
            .compare(&report_a.metrics, &report_b.metrics, label_a, label_b);

        Ok(ComparisonReport {
            project_a: report_a,
            project_b: report_b,
            preferred,
            comparison: message,
        })
    }

    /// Evaluate many requests in parallel; each result stands alone
    pub fn evaluate_batch(&self, requests: &[EvaluationRequest]) -> Vec<Result<EvaluationReport>> {
        requests.par_iter().map(|r| self.evaluate(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_rounding() {
        assert_eq!(round2(197.81301112), 197.81);
        assert_eq!(round2(-620.9213), -620.92);
    }

    #[test]
    fn test_validate_rejects_empty() {
        let request = EvaluationRequest::new(1000.0, vec![], 0.1);
        assert_eq!(request.validate(), Err(ValidationError::EmptyCashflows));
    }

    #[test]
    fn test_validate_rejects_bad_rate() {
        let request = EvaluationRequest::new(1000.0, vec![100.0], -1.0);
        assert_eq!(request.validate(), Err(ValidationError::RateOutOfRange { rate: -1.0 }));
        let request = EvaluationRequest::new(1000.0, vec![100.0], f64::NAN);
        assert!(matches!(request.validate(), Err(ValidationError::NotFinite { .. })));
    }

    #[test]
    fn test_evaluate_report_fields() {
        let request = EvaluationRequest::new(1000.0, vec![300.0; 5], 0.08);
        let report = Evaluator::new().evaluate(&request).unwrap();

        assert_eq!(report.npv, 197.81);
        assert_eq!(report.irr_pct, Some(15.24));
        assert_eq!(report.arr_pct, 60.0);
        assert_eq!(report.arr_unit, RateUnit::Percent);
        assert_eq!(report.decision, Decision::Acceptable);
        assert_eq!(report.decision_label, "Good to invest");
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn test_evaluate_zero_cost_is_arr_error() {
        let request = EvaluationRequest::new(0.0, vec![100.0, 100.0], 0.08);
        let err = Evaluator::new().evaluate(&request).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInitialCost { .. }));
        assert!(err.to_string().contains("ARR"));
    }

    #[test]
    fn test_batch_keeps_failures_isolated() {
        let requests = vec![
            EvaluationRequest::new(1000.0, vec![300.0; 5], 0.08),
            EvaluationRequest::new(1000.0, vec![], 0.08),
            EvaluationRequest::new(1000.0, vec![100.0; 5], 0.10),
        ];
        let results = Evaluator::new().evaluate_batch(&requests);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(EngineError::Validation(_))));
        assert_eq!(results[2].as_ref().unwrap().decision, Decision::NotAcceptable);
    }

    #[test]
    fn test_report_serializes() {
        let request = EvaluationRequest::new(1000.0, vec![-200.0, -300.0], 0.10);
        let report = Evaluator::new().evaluate(&request).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["irr_pct"].is_null());
        assert_eq!(json["irr_status"]["status"], "undefined");
        assert_eq!(json["decision"], "NotAcceptable");
    }

    #[test]
    fn test_years_mismatch_is_informational() {
        let mut request = EvaluationRequest::new(1000.0, vec![300.0; 5], 0.08);
        request.holding_period_years = Some(3);
        let report = Evaluator::new().evaluate(&request).unwrap();
        assert_eq!(report.holding_period_years, Some(3));
        assert_eq!(report.npv, 197.81);
        assert_eq!(report.decision, Decision::Acceptable);
    }

    #[test]
    fn test_request_deserializes_without_years() {
        let request: EvaluationRequest = serde_json::from_str(
            r#"{"initial_cost": 1000, "cashflows": [300, 300], "target_rate": 0.1}"#,
        )
        .unwrap();
        assert_eq!(request.holding_period_years, None);
    }
}

//! Conjunctive accept/reject policy

use crate::metrics::MetricResult;
use serde::{Deserialize, Serialize};

/// Investment verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Acceptable,
    NotAcceptable,
}

impl Decision {
    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Acceptable => "Good to invest",
            Decision::NotAcceptable => "Not good to invest",
        }
    }

    pub fn is_acceptable(&self) -> bool {
        matches!(self, Decision::Acceptable)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Metric a criterion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    Npv,
    Irr,
    Arr,
}

/// Pass/fail outcome of each criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaCheck {
    /// `npv > 0`
    pub npv_positive: bool,
    /// IRR present and `irr > target_rate`
    pub irr_above_target: bool,
    /// `arr > target_rate`
    pub arr_above_target: bool,
}

impl CriteriaCheck {
    pub fn evaluate(npv: f64, irr: Option<f64>, arr: f64, target_rate: f64) -> Self {
        Self {
            npv_positive: npv > 0.0,
            // An undefined IRR cannot be shown to beat the target
            irr_above_target: irr.is_some_and(|r| r > target_rate),
            arr_above_target: arr > target_rate,
        }
    }

    pub fn all_pass(&self) -> bool {
        self.npv_positive && self.irr_above_target && self.arr_above_target
    }

    /// Failing criteria in NPV, IRR, ARR order
    pub fn failing(&self) -> Vec<Criterion> {
        let mut failed = Vec::new();
        if !self.npv_positive {
            failed.push(Criterion::Npv);
        }
        if !self.irr_above_target {
            failed.push(Criterion::Irr);
        }
        if !self.arr_above_target {
            failed.push(Criterion::Arr);
        }
        failed
    }
}

/// Applies the accept/reject policy.
///
/// A project is acceptable only if NPV is positive, IRR exists and beats the
/// target rate, and ARR beats the target rate. ARR and the target are both
/// fractions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    pub fn decide(npv: f64, irr: Option<f64>, arr: f64, target_rate: f64) -> Decision {
        if CriteriaCheck::evaluate(npv, irr, arr, target_rate).all_pass() {
            Decision::Acceptable
        } else {
            Decision::NotAcceptable
        }
    }

    /// Decision recomputed from a metric result
    pub fn decide_metrics(metrics: &MetricResult, target_rate: f64) -> Decision {
        Self::decide(metrics.npv, metrics.irr, metrics.arr, target_rate)
    }
}

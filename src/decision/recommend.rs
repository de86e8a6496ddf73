//! Quantified guidance and head-to-head project comparison

use super::policy::{CriteriaCheck, Criterion};
use crate::cashflow::has_sign_change;
use crate::config::{EngineConfig, DEFAULT_NPV_TIE_TOLERANCE, DEFAULT_RECOMMENDATION_BUFFER};
use crate::error::DegenerateSeries;
use crate::metrics::{average_investment, MetricResult};
use serde::{Deserialize, Serialize};

/// Message used when every criterion passes
pub const AFFIRMATIVE_MESSAGE: &str = "Project looks profitable. Stick with your plan!";

/// One guidance entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Failing criterion this entry addresses; `None` for the affirmative message
    pub criterion: Option<Criterion>,

    /// Quantified gap: currency for NPV/ARR, fraction of IRR for IRR
    pub amount: Option<f64>,

    pub message: String,
}

impl Recommendation {
    pub fn is_affirmative(&self) -> bool {
        self.criterion.is_none()
    }

    fn affirmative() -> Self {
        Self {
            criterion: None,
            amount: None,
            message: AFFIRMATIVE_MESSAGE.to_string(),
        }
    }
}

/// Which project a comparison favours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    First,
    Second,
    Tie,
}

/// Result of comparing two evaluated projects by NPV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub preferred: Preference,
    pub message: String,
}

/// Turns failing criteria into actionable, quantified messages
#[derive(Debug, Clone, Copy)]
pub struct RecommendationGenerator {
    /// Margin added to IRR/ARR gaps (fraction)
    pub buffer: f64,
    /// Relative tolerance for NPV ties
    pub npv_tie_tolerance: f64,
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_RECOMMENDATION_BUFFER,
            npv_tie_tolerance: DEFAULT_NPV_TIE_TOLERANCE,
        }
    }
}

impl RecommendationGenerator {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            buffer: config.recommendation_buffer,
            npv_tie_tolerance: config.npv_tie_tolerance,
        }
    }

    /// Guidance from raw metric values.
    ///
    /// `flows` is only consulted to explain an absent IRR. The reason is
    /// inferred from the flows alone, so a solver failure (`Singular`) reads
    /// as `NoRealPositiveRoot` here; use [`Self::recommend_with_reason`] or
    /// [`Self::recommend_metrics`] when the solver outcome is at hand.
    pub fn recommend(
        &self,
        initial_cost: f64,
        flows: &[f64],
        target_rate: f64,
        npv: f64,
        irr: Option<f64>,
        arr: f64,
    ) -> Vec<Recommendation> {
        let reason = match irr {
            Some(_) => None,
            None if flows.len() < 2 => Some(DegenerateSeries::TooFewFlows),
            None if !has_sign_change(flows) => Some(DegenerateSeries::NoSignChange),
            None => Some(DegenerateSeries::NoRealPositiveRoot),
        };
        self.build(initial_cost, target_rate, npv, irr, arr, reason)
    }

    /// Guidance from raw metric values with the solver's own reason for an absent IRR
    pub fn recommend_with_reason(
        &self,
        initial_cost: f64,
        target_rate: f64,
        npv: f64,
        irr: Option<f64>,
        arr: f64,
        irr_reason: Option<DegenerateSeries>,
    ) -> Vec<Recommendation> {
        self.build(initial_cost, target_rate, npv, irr, arr, irr_reason)
    }

    /// Guidance for an already computed metric result
    pub fn recommend_metrics(&self, metrics: &MetricResult, target_rate: f64) -> Vec<Recommendation> {
        self.build(
            metrics.initial_cost,
            target_rate,
            metrics.npv,
            metrics.irr,
            metrics.arr,
            metrics.irr_status.undefined_reason(),
        )
    }

    fn build(
        &self,
        initial_cost: f64,
        target_rate: f64,
        npv: f64,
        irr: Option<f64>,
        arr: f64,
        irr_reason: Option<DegenerateSeries>,
    ) -> Vec<Recommendation> {
        let check = CriteriaCheck::evaluate(npv, irr, arr, target_rate);
        let mut recommendations = Vec::new();

        for criterion in check.failing() {
            let rec = match criterion {
                Criterion::Npv => {
                    let shortfall = npv.abs();
                    Recommendation {
                        criterion: Some(Criterion::Npv),
                        amount: Some(shortfall),
                        message: format!(
                            "Increase total cash inflows by at least {:.2} or reduce initial cost by the same amount to make NPV positive.",
                            shortfall
                        ),
                    }
                }
                Criterion::Irr => match irr {
                    Some(rate) => {
                        let increase = target_rate - rate + self.buffer;
                        Recommendation {
                            criterion: Some(Criterion::Irr),
                            amount: Some(increase),
                            message: format!(
                                "Consider increasing yearly cash inflows or shortening the project duration to increase IRR by at least {:.2}%.",
                                increase * 100.0
                            ),
                        }
                    }
                    None => {
                        let required = target_rate + self.buffer;
                        let reason = irr_reason.unwrap_or(DegenerateSeries::NoRealPositiveRoot);
                        Recommendation {
                            criterion: Some(Criterion::Irr),
                            amount: None,
                            message: format!(
                                "IRR could not be computed because {}. Restructure the cash flows so the project reaches an IRR of at least {:.2}%.",
                                reason.reason(),
                                required * 100.0
                            ),
                        }
                    }
                },
                Criterion::Arr => {
                    let gap = target_rate - arr + self.buffer;
                    let increase = gap * average_investment(initial_cost);
                    Recommendation {
                        criterion: Some(Criterion::Arr),
                        amount: Some(increase),
                        message: format!(
                            "Increase average yearly profit by {:.2} or reduce initial investment to achieve ARR above your target.",
                            increase
                        ),
                    }
                }
            };
            recommendations.push(rec);
        }

        if recommendations.is_empty() {
            recommendations.push(Recommendation::affirmative());
        }

        recommendations
    }

    /// Compare two projects by NPV; does not re-run any solver
    pub fn compare(
        &self,
        first: &MetricResult,
        second: &MetricResult,
        first_label: &str,
        second_label: &str,
    ) -> Comparison {
        let (a, b) = (first.npv, second.npv);
        let scale = a.abs().max(b.abs()).max(1.0);

        if (a - b).abs() <= self.npv_tie_tolerance * scale {
            return Comparison {
                preferred: Preference::Tie,
                message: format!(
                    "{} and {} are equally profitable with an NPV of {:.2}.",
                    first_label, second_label, a
                ),
            };
        }

        let (preferred, winner, winner_npv, loser, loser_npv) = if a > b {
            (Preference::First, first_label, a, second_label, b)
        } else {
            (Preference::Second, second_label, b, first_label, a)
        };

        Comparison {
            preferred,
            message: format!(
                "{} is more profitable with an NPV of {:.2} versus {:.2} for {}.",
                winner, winner_npv, loser_npv, loser
            ),
        }
    }
}

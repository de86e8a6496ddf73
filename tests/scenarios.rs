//! End-to-end evaluation scenarios and metric properties.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use capital_budgeting::decision::{Preference, AFFIRMATIVE_MESSAGE};
use capital_budgeting::metrics::{irr, npv, IrrSolver};
use capital_budgeting::{
    ArrBasis, CashflowSeries, ComparisonRequest, Decision, DecisionEngine, EngineConfig,
    EvaluationRequest, Evaluator, ProjectInput, RecommendationGenerator,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_series() -> Vec<Vec<f64>> {
    vec![
        vec![-1000.0, 300.0, 300.0, 300.0, 300.0, 300.0],
        vec![-1000.0, 100.0, 100.0, 100.0, 100.0, 100.0],
        vec![-1000.0, 600.0, 600.0],
        vec![-1000.0, 300.0, 300.0, 300.0, 300.0],
        vec![-5000.0, 0.0, 1200.0, 1800.0, 2500.0, 900.0, 400.0],
        vec![-750.0, 10.0, 20.0, 30.0, 1000.0],
    ]
}

fn project(initial_cost: f64, cashflows: &[f64]) -> ProjectInput {
    ProjectInput {
        label: None,
        initial_cost,
        cashflows: cashflows.to_vec(),
        holding_period_years: Some(cashflows.len() as u32),
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_level_inflows_accepted() {
    let mut request = EvaluationRequest::new(1000.0, vec![300.0; 5], 0.08);
    request.holding_period_years = Some(5);
    let report = Evaluator::new().evaluate(&request).unwrap();

    assert!(report.metrics.npv > 0.0);
    assert_abs_diff_eq!(report.irr_pct.unwrap(), 15.24, epsilon = 1e-9);
    assert_eq!(report.decision, Decision::Acceptable);
    assert_eq!(report.recommendations, vec![AFFIRMATIVE_MESSAGE.to_string()]);
}

#[test]
fn scenario_weak_inflows_rejected_with_shortfall() {
    let request = EvaluationRequest::new(1000.0, vec![100.0; 5], 0.10);
    let report = Evaluator::new().evaluate(&request).unwrap();

    assert!(report.metrics.npv < 0.0);
    assert!(report.metrics.irr.unwrap() < 0.10);
    assert_eq!(report.decision, Decision::NotAcceptable);
    assert_eq!(report.npv, -620.92);
    assert!(report.recommendations[0].contains("620.92"));
}

#[test]
fn scenario_no_inflows_has_no_irr() {
    let series = CashflowSeries::new(vec![-1000.0, -200.0, -300.0]).unwrap();
    let report = Evaluator::new().evaluate_series(&series, 0.10, None).unwrap();

    assert!(report.irr_pct.is_none());
    assert!(report.metrics.irr.is_none());
    assert_eq!(report.decision, Decision::NotAcceptable);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.starts_with("IRR could not be computed")));
}

#[test]
fn scenario_comparison_picks_higher_npv() {
    let request = ComparisonRequest {
        project_a: project(1000.0, &[600.0, 600.0]),
        project_b: project(1000.0, &[300.0, 300.0, 300.0, 300.0]),
        target_rate: 0.10,
    };
    let report = Evaluator::new().compare(&request).unwrap();

    assert!(report.project_a.metrics.npv > report.project_b.metrics.npv);
    assert_eq!(report.preferred, Preference::First);
    assert!(report.comparison.contains("Project A is more profitable"));
}

#[test]
fn scenario_comparison_uses_labels() {
    let mut a = project(1000.0, &[300.0, 300.0, 300.0, 300.0]);
    a.label = Some("Warehouse".into());
    let mut b = project(1000.0, &[600.0, 600.0]);
    b.label = Some("Fleet".into());

    let request = ComparisonRequest { project_a: a, project_b: b, target_rate: 0.10 };
    let report = Evaluator::new().compare(&request).unwrap();

    assert_eq!(report.preferred, Preference::Second);
    assert!(report.comparison.starts_with("Fleet is more profitable"));
}

#[test]
fn net_of_depreciation_basis_changes_arr_only() {
    let request = EvaluationRequest::new(1000.0, vec![300.0; 5], 0.08);
    let gross = Evaluator::new().evaluate(&request).unwrap();
    let net = Evaluator::with_config(EngineConfig::default().with_arr_basis(ArrBasis::NetOfDepreciation))
        .evaluate(&request)
        .unwrap();

    assert_eq!(gross.arr_pct, 60.0);
    assert_eq!(net.arr_pct, 20.0);
    assert_eq!(net.arr_basis, ArrBasis::NetOfDepreciation);
    assert_abs_diff_eq!(gross.metrics.npv, net.metrics.npv, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn irr_round_trips_through_npv() {
    for flows in sample_series() {
        let rate = irr(&flows).unwrap();
        let value = npv(rate, &flows).unwrap();
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn same_sign_series_have_no_irr() {
    let cases = [
        vec![-1000.0, -200.0, -300.0],
        vec![1000.0, 200.0, 300.0],
        vec![0.0, 50.0, 0.0, 10.0],
        vec![-1.0, 0.0, -1.0],
    ];
    for flows in cases {
        assert!(irr(&flows).is_none(), "expected no IRR for {:?}", flows);
    }
}

#[test]
fn npv_decreases_with_rate() {
    for flows in sample_series() {
        let mut previous = npv(-0.5, &flows).unwrap();
        for step in 1..60 {
            let rate = -0.5 + step as f64 * 0.05;
            let current = npv(rate, &flows).unwrap();
            assert!(current < previous, "NPV rose at rate {} for {:?}", rate, flows);
            previous = current;
        }
    }
}

#[test]
fn non_positive_npv_always_rejects() {
    for npv_value in [0.0, -0.01, -1e6] {
        for irr_value in [None, Some(-0.5), Some(0.5), Some(10.0)] {
            for arr_value in [-1.0, 0.0, 5.0] {
                assert_eq!(
                    DecisionEngine::decide(npv_value, irr_value, arr_value, 0.08),
                    Decision::NotAcceptable
                );
            }
        }
    }
}

#[test]
fn recommendations_match_decision() {
    let generator = RecommendationGenerator::default();
    let config = EngineConfig::default();
    for flows in sample_series() {
        let series = CashflowSeries::new(flows).unwrap();
        for rate in [0.0, 0.05, 0.10, 0.20] {
            let metrics = capital_budgeting::MetricResult::compute(&series, rate, &config).unwrap();
            let decision = DecisionEngine::decide_metrics(&metrics, rate);
            let recs = generator.recommend_metrics(&metrics, rate);

            assert!(!recs.is_empty());
            let affirmative = recs.iter().filter(|r| r.is_affirmative()).count();
            if decision == Decision::Acceptable {
                assert_eq!(affirmative, 1);
                assert_eq!(recs.len(), 1);
            } else {
                assert_eq!(affirmative, 0);
            }
        }
    }
}

#[test]
fn multiple_irr_selects_rate_nearest_zero() {
    // Roots at 10% and 20%
    let solution = IrrSolver::default().solve(&[-100.0, 230.0, -132.0]).unwrap();
    assert!(!solution.is_unique());
    assert_relative_eq!(solution.rate, 0.10, max_relative = 1e-9);
}

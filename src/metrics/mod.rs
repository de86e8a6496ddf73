//! Financial metrics: NPV, IRR and ARR over a cash flow series

mod discounting;
mod irr_solver;
mod accounting;

pub use discounting::{discount_factor, npv};
pub use irr_solver::{irr, IrrSolution, IrrSolver, IrrStatus};
pub use accounting::{arr, arr_with_basis, average_investment};

use crate::cashflow::CashflowSeries;
use crate::config::{ArrBasis, EngineConfig};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Unit a ratio metric is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    /// 0.12 means 12%
    Fraction,
    /// 12.0 means 12%
    Percent,
}

/// Full-precision metrics for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// NPV at the target rate
    pub npv: f64,

    /// Canonical IRR as a fraction, absent when undefined
    pub irr: Option<f64>,

    /// How the IRR was resolved
    pub irr_status: IrrStatus,

    /// ARR, in `arr_unit`
    pub arr: f64,

    /// Always `Fraction` so ARR and the target rate share a unit
    pub arr_unit: RateUnit,

    /// Profit basis used for ARR
    pub arr_basis: ArrBasis,

    /// `|initial_cost|`, kept for guidance amounts
    pub initial_cost: f64,
}

impl MetricResult {
    /// Compute NPV, IRR and ARR for `series` at `rate`
    pub fn compute(series: &CashflowSeries, rate: f64, config: &EngineConfig) -> Result<Self> {
        let npv = npv(rate, series.flows())?;

        let outcome = IrrSolver::from_config(config).solve(series.flows());
        let irr_status = IrrStatus::from_outcome(&outcome);
        let irr = outcome.ok().map(|s| s.rate);

        let arr = arr_with_basis(series.initial_cost(), series.periodic(), config.arr_basis)?;

        Ok(Self {
            npv,
            irr,
            irr_status,
            arr,
            arr_unit: RateUnit::Fraction,
            arr_basis: config.arr_basis,
            initial_cost: series.initial_cost().abs(),
        })
    }

    /// Average book investment (`|initial_cost| / 2`)
    pub fn average_investment(&self) -> f64 {
        average_investment(self.initial_cost)
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::NowcastError;
use crate::period::AnalysisPeriod;
use crate::time_value::{future_value, growth_base};
use crate::types::{CashflowRecord, Money, Rate, ScenarioRate};
use crate::NowcastResult;

use super::projection::{active_cashflows, build_projections, scenario_values, CashflowProjection};

/// Forecast for one named scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub rate: Rate,
    pub portfolio_future_value: Money,
    pub cashflow_future_value_total: Money,
    /// Always `portfolio_future_value + cashflow_future_value_total`.
    pub total_future_value: Money,
    pub cashflow_projections: Vec<CashflowProjection>,
}

/// Reject scenarios whose growth base `1 + rate/100` is not positive.
pub fn check_scenario_domain(scenario: &ScenarioRate) -> NowcastResult<()> {
    growth_base(scenario.annual_rate_percent)
        .map(|_| ())
        .map_err(|_| NowcastError::DomainError {
            context: format!("scenario '{}'", scenario.name),
            rate_percent: scenario.annual_rate_percent,
        })
}

/// Project the beginning market value and every cashflow to the period end
/// under a single scenario.
///
/// When `shared_projections` is given it must be the itemization of the same
/// `cashflows` (one entry per non-zero record, same order); values already
/// computed for this scenario are reused rather than recomputed.
pub fn evaluate_scenario(
    beginning_mv: Money,
    period: &AnalysisPeriod,
    scenario: &ScenarioRate,
    cashflows: &[CashflowRecord],
    shared_projections: Option<&[CashflowProjection]>,
) -> NowcastResult<ScenarioResult> {
    let elapsed_days = period.elapsed_days()?;
    check_scenario_domain(scenario)?;

    let rate = scenario.annual_rate_percent;
    let portfolio_future_value = future_value(beginning_mv, rate, elapsed_days)?;

    let cashflow_projections = match shared_projections {
        Some(shared) => reuse_projections(shared, cashflows, period, scenario)?,
        None => build_projections(cashflows, period, std::slice::from_ref(scenario))?,
    };

    let mut cashflow_future_value_total = Decimal::ZERO;
    for projection in &cashflow_projections {
        // Present for every entry: either shared or filled in above.
        if let Some(fv) = projection.future_value_for(&scenario.name) {
            cashflow_future_value_total += fv;
        }
    }

    let total_future_value = portfolio_future_value + cashflow_future_value_total;

    log::info!(
        "Calculated {} scenario ({}%): total FV = {}",
        scenario.name,
        rate,
        total_future_value.round_dp(0)
    );

    Ok(ScenarioResult {
        scenario_name: scenario.name.clone(),
        rate,
        portfolio_future_value,
        cashflow_future_value_total,
        total_future_value,
        cashflow_projections,
    })
}

fn reuse_projections(
    shared: &[CashflowProjection],
    cashflows: &[CashflowRecord],
    period: &AnalysisPeriod,
    scenario: &ScenarioRate,
) -> NowcastResult<Vec<CashflowProjection>> {
    let active = active_cashflows(cashflows);
    if shared.len() != active.len() {
        return Err(NowcastError::InvalidInput {
            field: "shared_projections".into(),
            reason: format!(
                "expected {} projections for the non-zero cashflows, got {}",
                active.len(),
                shared.len()
            ),
        });
    }

    if let Some(idx) = shared
        .iter()
        .zip(&active)
        .position(|(projection, record)| !projection.matches(record))
    {
        return Err(NowcastError::InvalidInput {
            field: "shared_projections".into(),
            reason: format!("projection {idx} does not correspond to cashflow {idx}"),
        });
    }

    let mut projections = shared.to_vec();
    if projections
        .iter()
        .any(|p| p.future_value_for(&scenario.name).is_none())
    {
        let values = scenario_values(&active, period.end_date, scenario)?;
        for (projection, value) in projections.iter_mut().zip(values) {
            projection
                .future_value_per_scenario
                .entry(scenario.name.clone())
                .or_insert(value);
        }
    }

    Ok(projections)
}

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::NowcastError;
use crate::period::AnalysisPeriod;
use crate::types::{CashflowRecord, Money, ScenarioRate};
use crate::NowcastResult;

use super::engine::{check_scenario_domain, evaluate_scenario, ScenarioResult};
use super::projection::{active_cashflows, scenario_values, CashflowProjection};

/// Scenario name to result. Scenarios that failed are absent.
pub type ScenarioResults = BTreeMap<String, ScenarioResult>;

/// A scenario left out of the results, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFailure {
    pub scenario_name: String,
    pub message: String,
}

/// Results plus the scenarios that had to be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioEvaluation {
    pub results: ScenarioResults,
    pub failures: Vec<ScenarioFailure>,
}

impl ScenarioEvaluation {
    pub fn warnings(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| format!("Scenario '{}' omitted: {}", f.scenario_name, f.message))
            .collect()
    }
}

/// Run every named scenario over the same period and cashflows.
///
/// A scenario that cannot be valued is logged and left out of the mapping;
/// callers needing all scenarios must check for missing keys.
pub fn evaluate_all_scenarios(
    beginning_mv: Money,
    period: &AnalysisPeriod,
    named_rates: &[ScenarioRate],
    cashflows: &[CashflowRecord],
) -> NowcastResult<ScenarioResults> {
    evaluate_all_scenarios_with_warnings(beginning_mv, period, named_rates, cashflows)
        .map(|evaluation| evaluation.results)
}

/// As [`evaluate_all_scenarios`], also returning the omitted scenarios.
pub fn evaluate_all_scenarios_with_warnings(
    beginning_mv: Money,
    period: &AnalysisPeriod,
    named_rates: &[ScenarioRate],
    cashflows: &[CashflowRecord],
) -> NowcastResult<ScenarioEvaluation> {
    period.validate()?;
    check_unique_names(named_rates)?;

    let mut evaluation = ScenarioEvaluation::default();
    let mut omitted: HashSet<&str> = HashSet::new();

    let active = active_cashflows(cashflows);
    let mut projections: Vec<CashflowProjection> = active
        .iter()
        .map(|cf| CashflowProjection::from_record(cf))
        .collect();

    // Single itemization pass shared by every scenario
    for scenario in named_rates {
        let values = check_scenario_domain(scenario)
            .and_then(|_| scenario_values(&active, period.end_date, scenario));
        match values {
            Ok(values) => {
                for (projection, value) in projections.iter_mut().zip(values) {
                    projection
                        .future_value_per_scenario
                        .insert(scenario.name.clone(), value);
                }
            }
            Err(e) => {
                record_failure(&mut evaluation, scenario, &e);
                omitted.insert(scenario.name.as_str());
            }
        }
    }

    for scenario in named_rates {
        if omitted.contains(scenario.name.as_str()) {
            continue;
        }
        match evaluate_scenario(beginning_mv, period, scenario, cashflows, Some(&projections)) {
            Ok(result) => {
                evaluation.results.insert(scenario.name.clone(), result);
            }
            Err(e) => record_failure(&mut evaluation, scenario, &e),
        }
    }

    log::info!(
        "Calculated {} of {} scenarios with {} cashflows",
        evaluation.results.len(),
        named_rates.len(),
        projections.len()
    );

    Ok(evaluation)
}

fn record_failure(evaluation: &mut ScenarioEvaluation, scenario: &ScenarioRate, e: &NowcastError) {
    log::warn!("Failed to calculate scenario {}: {}", scenario.name, e);
    evaluation.failures.push(ScenarioFailure {
        scenario_name: scenario.name.clone(),
        message: e.to_string(),
    });
}

fn check_unique_names(named_rates: &[ScenarioRate]) -> NowcastResult<()> {
    let mut seen = HashSet::new();
    for scenario in named_rates {
        if !seen.insert(scenario.name.as_str()) {
            return Err(NowcastError::InvalidInput {
                field: "named_rates".into(),
                reason: format!("scenario '{}' is listed more than once", scenario.name),
            });
        }
    }
    Ok(())
}

//! End-to-end forecasts: validate, fetch, evaluate every scenario and lay out
//! the report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::ForecastSettings;
use crate::data::{to_cashflow_records, PortfolioDataSource};
use crate::error::NowcastError;
use crate::period::{month_index, AnalysisPeriod};
use crate::report::ForecastTable;
use crate::scenarios::{evaluate_all_scenarios_with_warnings, ScenarioFailure, ScenarioResults};
use crate::time_value::DAYS_PER_YEAR;
use crate::types::{with_metadata, CashflowRecord, ComputationOutput, Money, ScenarioRate};
use crate::validation::{
    horizon_warnings, validate_cashflow_dates, validate_cashflow_inputs, validate_data_consistency,
    validate_date_inputs, validate_portfolio_inputs, validate_scenario_inputs,
};
use crate::NowcastResult;

const METHODOLOGY: &str = "Multi-Scenario Compound Growth (actual/365 day count)";

/// Forecast a stored portfolio group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub group_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub scenarios: Vec<ScenarioRate>,
}

/// Forecast from caller-supplied figures, no data source involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualForecastInput {
    pub group_code: String,
    pub beginning_mv: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub scenarios: Vec<ScenarioRate>,
    #[serde(default)]
    pub cashflows: Vec<CashflowRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastOutput {
    pub group_code: String,
    pub period: AnalysisPeriod,
    pub horizon_months: u32,
    pub beginning_mv: Money,
    pub ending_mv: Option<Money>,
    pub results: ScenarioResults,
    pub forecast_table: ForecastTable,
    pub omitted_scenarios: Vec<ScenarioFailure>,
}

/// Forecast a group held in `source`, checking the window against `as_of`.
pub fn run_forecast(
    source: &impl PortfolioDataSource,
    request: &ForecastRequest,
    settings: &ForecastSettings,
    as_of: NaiveDate,
) -> NowcastResult<ComputationOutput<ForecastOutput>> {
    let start = Instant::now();

    validate_date_inputs(
        Some(&request.group_code),
        Some(request.start_date),
        Some(request.end_date),
        as_of,
        settings,
    )?;
    validate_scenario_inputs(&request.scenarios, settings)?;

    let group_code = request.group_code.trim();
    if !source.group_exists(group_code) {
        return Err(NowcastError::DataUnavailable {
            group_code: group_code.to_string(),
            reason: "group not found".into(),
        });
    }

    let period = AnalysisPeriod::new(request.start_date, request.end_date)?;
    let market_values = source.market_values(group_code, period.start_date, period.end_date)?;
    let raw = source.cashflows(group_code, period.start_date, period.end_date)?;
    let cashflows = to_cashflow_records(&raw, period.start_date);
    validate_cashflow_dates(&period, &cashflows)?;

    let mut warnings = horizon_warnings(&period, &cashflows);
    if market_values.ending_mv.is_none() {
        warnings.push(format!(
            "No recorded market value on {}; ending value not reported",
            period.end_date
        ));
    }

    let output = assemble(
        group_code,
        period,
        market_values.beginning_mv,
        market_values.ending_mv,
        &request.scenarios,
        &cashflows,
        &mut warnings,
    )?;

    log::info!("Successfully calculated scenarios for group: {group_code}");
    Ok(finish(output, warnings, &request.scenarios, cashflows.len(), start))
}

/// Forecast caller-supplied figures. Cashflows without a month index get one.
pub fn run_manual_forecast(
    input: &ManualForecastInput,
    settings: &ForecastSettings,
) -> NowcastResult<ComputationOutput<ForecastOutput>> {
    let start = Instant::now();

    validate_portfolio_inputs(Some(&input.group_code), Some(input.beginning_mv), settings)?;
    let period = AnalysisPeriod::new(input.start_date, input.end_date)?;
    validate_scenario_inputs(&input.scenarios, settings)?;

    let mut messages = Vec::new();
    for (i, cf) in input.cashflows.iter().enumerate() {
        if let Err(e) = validate_cashflow_inputs(cf, settings) {
            messages.extend(
                e.messages()
                    .into_iter()
                    .map(|m| format!("Cashflow #{}: {m}", i + 1)),
            );
        }
    }
    if !messages.is_empty() {
        return Err(NowcastError::Validation(messages));
    }

    let cashflows: Vec<CashflowRecord> = input
        .cashflows
        .iter()
        .cloned()
        .map(|mut cf| {
            if cf.month_index.is_none() {
                cf.month_index = Some(month_index(period.start_date, cf.date));
            }
            cf
        })
        .collect();
    validate_data_consistency(&period, &cashflows, settings)?;

    let mut warnings = horizon_warnings(&period, &cashflows);
    let group_code = input.group_code.trim();
    let output = assemble(
        group_code,
        period,
        input.beginning_mv,
        None,
        &input.scenarios,
        &cashflows,
        &mut warnings,
    )?;

    log::info!("Successfully calculated manual scenarios for group: {group_code}");
    Ok(finish(output, warnings, &input.scenarios, cashflows.len(), start))
}

/// Evaluate every scenario and lay out the table; omitted scenarios are
/// appended to `warnings`.
fn assemble(
    group_code: &str,
    period: AnalysisPeriod,
    beginning_mv: Money,
    ending_mv: Option<Money>,
    scenarios: &[ScenarioRate],
    cashflows: &[CashflowRecord],
    warnings: &mut Vec<String>,
) -> NowcastResult<ForecastOutput> {
    let evaluation =
        evaluate_all_scenarios_with_warnings(beginning_mv, &period, scenarios, cashflows)?;
    warnings.extend(evaluation.warnings());

    let order: Vec<String> = scenarios.iter().map(|s| s.name.clone()).collect();
    let forecast_table = ForecastTable::build(beginning_mv, &period, &order, &evaluation.results);

    Ok(ForecastOutput {
        group_code: group_code.to_string(),
        period,
        horizon_months: period.horizon_months(),
        beginning_mv,
        ending_mv,
        results: evaluation.results,
        forecast_table,
        omitted_scenarios: evaluation.failures,
    })
}

fn finish(
    output: ForecastOutput,
    warnings: Vec<String>,
    scenarios: &[ScenarioRate],
    num_cashflows: usize,
    start: Instant,
) -> ComputationOutput<ForecastOutput> {
    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "day_count_basis": DAYS_PER_YEAR.to_string(),
        "elapsed_days": (output.period.end_date - output.period.start_date).num_days(),
        "num_cashflows": num_cashflows,
        "scenarios": scenarios,
    });
    with_metadata(METHODOLOGY, &assumptions, warnings, elapsed, output)
}

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nowcast_core::config::ForecastSettings;
use nowcast_core::forecast::ManualForecastInput;
use nowcast_core::period::AnalysisPeriod;
use nowcast_core::types::{CashflowRecord, ScenarioRate};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct FutureValueInput {
    present_value: Decimal,
    annual_rate_percent: Decimal,
    elapsed_days: i64,
}

#[derive(Serialize)]
struct FutureValueOutput {
    future_value: Decimal,
}

#[derive(Deserialize)]
struct ScenariosInput {
    beginning_mv: Decimal,
    period: AnalysisPeriod,
    scenarios: Vec<ScenarioRate>,
    #[serde(default)]
    cashflows: Vec<CashflowRecord>,
}

// ---------------------------------------------------------------------------
// Compounding
// ---------------------------------------------------------------------------

#[napi]
pub fn future_value(input_json: String) -> NapiResult<String> {
    let input: FutureValueInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let future_value = nowcast_core::time_value::future_value(
        input.present_value,
        input.annual_rate_percent,
        input.elapsed_days,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&FutureValueOutput { future_value }).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// Returns `{"results": {...}, "failures": [...]}`; omitted scenarios are
/// listed under `failures`.
#[napi]
pub fn evaluate_all_scenarios(input_json: String) -> NapiResult<String> {
    let input: ScenariosInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let evaluation = nowcast_core::scenarios::evaluate_all_scenarios_with_warnings(
        input.beginning_mv,
        &input.period,
        &input.scenarios,
        &input.cashflows,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&evaluation).map_err(to_napi_error)
}

#[napi]
pub fn run_manual_forecast(input_json: String, settings_json: Option<String>) -> NapiResult<String> {
    let input: ManualForecastInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let settings = match settings_json {
        Some(json) => ForecastSettings::from_json_str(&json).map_err(to_napi_error)?,
        None => ForecastSettings::default(),
    };
    let output =
        nowcast_core::forecast::run_manual_forecast(&input, &settings).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

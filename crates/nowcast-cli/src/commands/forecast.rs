use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use nowcast_core::config::ForecastSettings;
use nowcast_core::data::InMemoryDataSource;
use nowcast_core::forecast::{self, ForecastRequest};
use nowcast_core::types::ScenarioRate;

use crate::input;

/// Arguments for a data-backed forecast
#[derive(Args)]
pub struct ForecastArgs {
    /// Path to JSON file with holdings and cashflows per group
    #[arg(long)]
    pub data: String,

    /// Portfolio group code
    #[arg(long)]
    pub group: String,

    /// Period start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Period end date / forecast horizon (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Downside annual growth rate in percent (e.g. -5)
    #[arg(long, allow_hyphen_values = true)]
    pub downside: Decimal,

    /// Base annual growth rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub base: Decimal,

    /// Upside annual growth rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub upside: Decimal,

    /// Date the lookback/lookahead window is measured from (defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// Map the three rate flags onto the configured scenario names, lowest first.
pub fn named_rates(
    settings: &ForecastSettings,
    rates: [Decimal; 3],
) -> Result<Vec<ScenarioRate>, Box<dyn std::error::Error>> {
    if settings.scenario_names.len() != rates.len() {
        return Err(format!(
            "--downside/--base/--upside need exactly 3 configured scenario names, found {}",
            settings.scenario_names.len()
        )
        .into());
    }
    Ok(settings
        .scenario_names
        .iter()
        .zip(rates)
        .map(|(name, rate)| ScenarioRate::new(name.clone(), rate))
        .collect())
}

pub fn run_forecast(
    args: ForecastArgs,
    settings: &ForecastSettings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let source: InMemoryDataSource = input::file::read_json(&args.data)?;
    let request = ForecastRequest {
        group_code: args.group,
        start_date: args.start,
        end_date: args.end,
        scenarios: named_rates(settings, [args.downside, args.base, args.upside])?,
    };
    let as_of = args
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let result = forecast::run_forecast(&source, &request, settings, as_of)?;
    Ok(serde_json::to_value(result)?)
}

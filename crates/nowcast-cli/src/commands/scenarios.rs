use clap::Args;
use serde_json::Value;

use nowcast_core::config::ForecastSettings;
use nowcast_core::forecast::{self, ManualForecastInput};

use crate::input;

/// Arguments for a manual (caller-supplied) forecast
#[derive(Args)]
pub struct ScenariosArgs {
    /// Path to JSON file with group_code, beginning_mv, start_date, end_date,
    /// scenarios and optional cashflows. Reads stdin when omitted.
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_scenarios(
    args: ScenariosArgs,
    settings: &ForecastSettings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: ManualForecastInput = input::read_input(args.input.as_deref())?;
    let result = forecast::run_manual_forecast(&input_data, settings)?;
    Ok(serde_json::to_value(result)?)
}

use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use nowcast_core::time_value::{self, days_between};

/// Arguments for a single-amount compounding calculation
#[derive(Args)]
pub struct FutureValueArgs {
    /// Present value
    #[arg(long, allow_hyphen_values = true)]
    pub pv: Decimal,

    /// Annual growth rate in percent (7 = 7%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Elapsed days (alternative to --start/--end)
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub days: Option<i64>,

    /// Valuation date of the present value
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Horizon date
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FutureValueOutput {
    future_value: Decimal,
    present_value: Decimal,
    annual_rate_percent: Decimal,
    elapsed_days: i64,
    growth: Decimal,
}

pub fn run_future_value(args: FutureValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let elapsed_days = match (args.days, args.start, args.end) {
        (Some(days), _, _) => days,
        (None, Some(start), Some(end)) => days_between(start, end),
        _ => return Err("--days <n> or --start <date> --end <date> required".into()),
    };
    if elapsed_days < 0 {
        return Err(format!("Elapsed days must not be negative, got {elapsed_days}").into());
    }

    let fv = time_value::future_value(args.pv, args.rate, elapsed_days)?;
    let output = FutureValueOutput {
        future_value: fv,
        present_value: args.pv,
        annual_rate_percent: args.rate,
        elapsed_days,
        growth: fv - args.pv,
    };

    Ok(serde_json::json!({ "result": output }))
}

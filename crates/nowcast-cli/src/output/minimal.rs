use serde_json::Value;

use super::{forecast_table, format_value, result_of};
use nowcast_core::report::RowKind;

/// Print just the headline numbers: each scenario's total for forecasts,
/// otherwise the future value.
pub fn print_minimal(value: &Value) {
    if let Some(grid) = forecast_table(value) {
        if let Some(total) = grid.rows.iter().find(|r| r.kind == RowKind::Total) {
            for (name, cell) in grid.scenarios.iter().zip(&total.values) {
                match cell {
                    Some(v) => println!("{name}: {}", v.round_dp(2)),
                    None => println!("{name}: omitted"),
                }
            }
        }
        return;
    }

    let result = result_of(value);
    for key in ["total_future_value", "future_value"] {
        if let Some(val) = result.get(key).filter(|v| !v.is_null()) {
            println!("{}", format_value(val));
            return;
        }
    }
    println!("{}", format_value(result));
}

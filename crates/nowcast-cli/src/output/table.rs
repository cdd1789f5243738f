use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{forecast_table, format_value, result_of};

/// Render forecasts as a grid plus a per-scenario summary; anything else as
/// a field/value table.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    if let Some(grid) = forecast_table(value) {
        let mut builder = Builder::default();
        builder.push_record(grid.headers());
        for row in grid.display_rows() {
            builder.push_record(row);
        }
        println!("{}", Table::from(builder));

        if let Some(Value::Object(results)) = result.get("results") {
            println!("\n{}", summary_table(&grid.scenarios, results));
        }
    } else if let Value::Object(map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", format_value(result));
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn summary_table(scenarios: &[String], results: &serde_json::Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record([
        "Scenario",
        "Rate %",
        "Portfolio FV",
        "Cashflow FV",
        "Total FV",
    ]);
    for name in scenarios {
        let Some(result) = results.get(name) else {
            builder.push_record([name.as_str(), "omitted", "", "", ""]);
            continue;
        };
        let field = |key: &str| result.get(key).map(format_value).unwrap_or_default();
        builder.push_record([
            name.clone(),
            field("rate"),
            field("portfolio_future_value"),
            field("cashflow_future_value_total"),
            field("total_future_value"),
        ]);
    }
    Table::from(builder)
}

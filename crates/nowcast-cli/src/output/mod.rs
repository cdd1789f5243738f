pub mod csv_out;
pub mod minimal;
pub mod table;

use nowcast_core::report::ForecastTable;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

/// The `result` object of an envelope, or the value itself.
fn result_of(value: &Value) -> &Value {
    value.get("result").unwrap_or(value)
}

/// The forecast grid carried by forecast outputs, if any.
fn forecast_table(value: &Value) -> Option<ForecastTable> {
    let table = result_of(value).get("forecast_table")?;
    match serde_json::from_value(table.clone()) {
        Ok(table) => Some(table),
        Err(e) => {
            log::warn!("Unreadable forecast table in output: {e}");
            None
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

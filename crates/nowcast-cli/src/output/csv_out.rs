use serde_json::Value;
use std::io;

use super::{forecast_table, format_value, result_of};

/// Write the forecast grid as CSV, or a field/value listing for other results.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match forecast_table(value) {
        Some(grid) => wtr.write_record(grid.headers()).and_then(|_| {
            grid.display_rows()
                .iter()
                .try_for_each(|row| wtr.write_record(row))
        }),
        None => match result_of(value) {
            Value::Object(map) => wtr.write_record(["field", "value"]).and_then(|_| {
                map.iter()
                    .try_for_each(|(key, val)| wtr.write_record([key.as_str(), &format_value(val)]))
            }),
            other => wtr.write_record([format_value(other)]),
        },
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {e}");
    }
}

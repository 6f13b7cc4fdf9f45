use serde_json::Value;
use std::io;

use super::{format_scalar, schedule_rows};

/// Write output as CSV to stdout.
///
/// Results with a schedule are written one row per year; everything else
/// as field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value).and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> Result<(), csv::Error> {
    let result = value.get("result").unwrap_or(value);

    if let Some(rows) = schedule_rows(result) {
        wtr.write_record(["year", "principal", "interest", "balance"])?;
        for row in rows {
            wtr.write_record(
                ["year", "principal", "interest", "balance"]
                    .map(|k| row.get(k).map(|v| format_scalar(v, "")).unwrap_or_default()),
            )?;
        }
        return Ok(());
    }

    match result {
        Value::Object(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.as_str(), &format_scalar(val, "")])?;
            }
        }
        _ => wtr.write_record([format_scalar(result, "")])?,
    }
    Ok(())
}

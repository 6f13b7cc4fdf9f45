pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The yearly schedule, when the result carries one (directly or inside a
/// summary's `amortization` section).
pub(crate) fn schedule_rows(result: &Value) -> Option<&Vec<Value>> {
    result
        .get("schedule")
        .or_else(|| result.get("amortization").and_then(|a| a.get("schedule")))
        .and_then(Value::as_array)
}

/// Render a scalar for a table cell or CSV field.
pub(crate) fn format_scalar(value: &Value, null: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

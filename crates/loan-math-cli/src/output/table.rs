use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, schedule_rows};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => println!("{}", field_table(map)),
        },
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        println!("{}", field_table(res_map));
        if let Some(rows) = schedule_rows(result) {
            println!("\nAmortization schedule:");
            println!("{}", schedule_table(rows));
        }
    } else {
        println!("{}", format_scalar(result, "null"));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column field/value table. Nested sections are flattened with dotted
/// names; the schedule is left to its own table.
fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    push_fields(&mut builder, "", map);
    builder.build()
}

fn push_fields(builder: &mut Builder, prefix: &str, map: &Map<String, Value>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => push_fields(builder, &name, inner),
            Value::Array(_) if key == "schedule" => {}
            _ => builder.push_record([name, format_scalar(val, "null")]),
        }
    }
}

fn schedule_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Year", "Principal", "Interest", "Balance"]);
    for row in rows {
        builder.push_record(
            ["year", "principal", "interest", "balance"]
                .map(|k| row.get(k).map(|v| format_scalar(v, "")).unwrap_or_default()),
        );
    }
    builder.build()
}

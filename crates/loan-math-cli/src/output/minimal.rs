use serde_json::Value;

use super::format_scalar;

/// Headline figure of each calculator, in priority order.
const PRIORITY_KEYS: [&str; 3] = ["monthly_payment", "dti_ratio", "roi_pct"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

/// Look for a headline key in the result, then one level down (summary
/// sections), then fall back to the first field.
pub(crate) fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return format_scalar(result_obj, "null");
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return format_scalar(val, "null");
        }
    }

    for (section, nested) in map {
        if let Value::Object(inner) = nested {
            for key in PRIORITY_KEYS {
                if let Some(val) = inner.get(key).filter(|v| !v.is_null()) {
                    return format!("{}.{}: {}", section, key, format_scalar(val, "null"));
                }
            }
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_scalar(val, "null")),
        None => "{}".to_string(),
    }
}

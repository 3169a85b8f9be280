use serde_json::Value;

use super::cell;

/// Print just the key answer value from the output.
///
/// For attribution reports that is the final period's total active
/// return; for allocation tables the number of rows and total; anything
/// else falls back to the first field.
pub fn print_minimal(value: &Value) {
    let payload = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = payload {
        // Attribution report: last period's headline number
        if let Some(Value::Array(rows)) = map.get("rows") {
            if let Some(Value::Object(last)) = rows.last() {
                if let Some(total) = last.get("total_active_return") {
                    println!("{}", cell(total));
                    return;
                }
            }
        }
        if let Some(total) = map.get("total_allocation") {
            println!("{}", cell(total));
            return;
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell(val));
            return;
        }
    }

    println!("{}", cell(payload));
}

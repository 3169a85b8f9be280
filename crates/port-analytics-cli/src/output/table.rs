use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::cell;

/// Format output as tables using the tabled crate.
///
/// Envelopes ({ result, warnings, methodology }) print their payload
/// first; every array of row objects inside the payload becomes its own
/// table, scalar fields a two-column one.
pub fn print_table(value: &Value) {
    let (payload, envelope) = match value {
        Value::Object(map) if map.contains_key("result") => {
            (map.get("result").unwrap_or(value), Some(map))
        }
        _ => (value, None),
    };

    print_payload(payload);

    if let Some(map) = envelope {
        if let Some(Value::Array(warnings)) = map.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }
        if let Some(Value::String(methodology)) = map.get("methodology") {
            println!("\nMethodology: {}", methodology);
        }
    }
}

fn print_payload(value: &Value) {
    match value {
        Value::Array(rows) => print_rows(rows),
        Value::Object(map) => {
            let mut scalars = Builder::default();
            scalars.push_record(["Field", "Value"]);
            let mut has_scalars = false;

            for (key, val) in map {
                match val {
                    Value::Array(rows) if rows.first().map_or(false, Value::is_object) => {
                        println!("{}:", key);
                        print_rows(rows);
                        println!();
                    }
                    _ => {
                        scalars.push_record([key.as_str(), &cell(val)]);
                        has_scalars = true;
                    }
                }
            }
            if has_scalars {
                println!("{}", Table::from(scalars));
            }
        }
        _ => println!("{}", value),
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", cell(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}

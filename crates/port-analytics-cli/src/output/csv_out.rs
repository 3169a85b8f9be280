use serde_json::Value;
use std::io;

use super::cell;

/// Write output as CSV to stdout.
///
/// Attribution and allocation outputs are row-oriented: the first array
/// of objects found in the payload becomes the CSV body. Scalar-only
/// payloads fall back to field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let payload = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match payload {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("rows") {
                write_rows(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &cell(val)]);
                }
            }
        }
        _ => {
            let _ = wtr.write_record([&cell(payload)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            let _ = wtr.write_record([&cell(row)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

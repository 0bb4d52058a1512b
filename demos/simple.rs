//! Restoring dates and big integers from an envelope, and emitting one back.
//!
//! Run with: cargo run --example simple

use serde_superjson::{parse, stringify, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let text = r#"{
        "json": {
            "created": "2024-01-01T00:00:00.000Z",
            "count": "-9007199254741992",
            "dates": ["2024-06-30T23:59:59.123Z", "x"]
        },
        "meta": {
            "values": { "created": ["Date"], "count": ["bigint"], "dates.0": ["Date"] },
            "v": 1
        }
    }"#;

    let value = parse(text)?;

    if let Some(created) = value.get("created").and_then(Value::as_date) {
        println!("created: {} (year {})", created, created.format("%Y"));
    }
    if let Some(count) = value.get("count").and_then(Value::as_bigint) {
        println!("count:   {} via {}", count, count.backend_name());
    }
    if let Some(dates) = value.get("dates").and_then(Value::as_array) {
        println!("dates:   {} / {}\n", dates[0].kind(), dates[1].kind());
    }

    // Emit the typed tree again
    let emitted = stringify(&value)?;
    println!("Envelope:\n{}\n", emitted);

    assert_eq!(parse(&emitted)?, value);
    println!("✓ Round-trip successful");

    Ok(())
}

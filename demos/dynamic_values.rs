//! Building values at runtime and choosing a big integer handler.
//!
//! Run with: cargo run --example dynamic_values

use chrono::Utc;
use serde::Serialize;
use serde_superjson::{
    deserialize, serialize_with_config, stringify_with_config, to_value, value, Availability,
    Config, Value,
};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Event {
    id: u32,
    name: String,
    tags: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a tree with the value! macro and attach a date
    let mut tree = value!({
        "service": "billing",
        "retries": 3,
        "owner": null
    });
    if let Value::Object(obj) = &mut tree {
        obj.insert("deployed".to_string(), Utc::now().into());
    }

    // Emit nulls as "undefined" annotations
    let config = Config::new().with_null_to_undefined(true);
    let envelope = serialize_with_config(&tree, &config)?;
    if let Some(meta) = &envelope.meta {
        for (path, tags) in &meta.values {
            let tags: Vec<_> = tags.iter().map(|t| t.as_str()).collect();
            println!("annotated {:?}: {:?}", path, tags);
        }
    }
    println!("{}\n", stringify_with_config(&tree, &config)?);

    // Pretend no arithmetic backend is available: big integers stay strings
    let fallback = Config::new().with_availability(Availability {
        integer: false,
        decimal: false,
    });
    println!("fallback handler: {}", fallback.big_int_handler()?.kind());

    // Envelopes decoded by another JSON layer
    let upstream = serde_json::json!({
        "json": { "ids": { "0": "18446744073709551616", "1": "7" } },
        "meta": { "values": { "ids.0": ["bigint"] }, "v": 1 }
    });
    let restored = deserialize(&upstream)?;
    println!("restored ids: {}", restored.get("ids").unwrap_or(&Value::Null));

    // Convert an existing struct
    let event = Event {
        id: 123,
        name: "deploy".to_string(),
        tags: vec!["prod".to_string()],
    };
    let event_value = to_value(&event)?;
    println!("\nEvent as Value: {}", event_value);
    println!("  is_object: {}", event_value.is_object());

    Ok(())
}

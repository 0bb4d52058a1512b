//! # serde_superjson
//!
//! Restores rich value types that plain JSON cannot carry (dates and
//! arbitrary-precision integers) from SuperJSON envelopes, and produces such
//! envelopes from typed trees.
//!
//! ## The envelope
//!
//! ```text
//! {
//!   "json": <any JSON value>,
//!   "meta": { "values": { "<dotted.path>": ["<tag>", ...] }, "v": 1 }
//! }
//! ```
//!
//! `json` is an ordinary JSON tree. `meta.values` maps a dotted path inside
//! that tree to the chain of type tags to apply there. Built-in tags are
//! `Date`, `bigint` and `undefined`; unknown tags leave the value untouched.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_superjson::{parse, stringify, Value};
//!
//! let text = r#"{
//!     "json": { "created": "2024-01-01T00:00:00.000Z", "count": "-9007199254741992" },
//!     "meta": { "values": { "created": ["Date"], "count": ["bigint"] }, "v": 1 }
//! }"#;
//!
//! let value = parse(text).unwrap();
//! assert!(value.get("created").unwrap().is_date());
//!
//! // And back again
//! let round_trip = parse(&stringify(&value).unwrap()).unwrap();
//! assert_eq!(round_trip, value);
//! ```
//!
//! ## Big integers
//!
//! `bigint` annotations are restored by a pluggable [`BigIntHandler`]. With
//! the default features the `num-bigint` backed [`IntegerHandler`] is used;
//! without it the `bigdecimal` backed [`DecimalHandler`], and without either
//! the [`StringHandler`], which keeps the digits as a string. See
//! [`Config::with_strict_big_int`] to refuse that last fallback.
//!
//! ## Building values
//!
//! ```rust
//! use serde_superjson::{value, Value};
//!
//! let tree = value!({ "tags": ["a", "b"], "active": true, "parent": null });
//! assert!(tree.is_object());
//! ```

pub mod bigint;
pub mod config;
pub mod envelope;
pub mod error;
pub mod macros;
pub mod map;
pub mod path;
pub mod ser;
pub mod transform;
pub mod value;

pub use bigint::{
    Availability, BigIntHandler, DecimalHandler, HandlerKind, IntegerHandler, StringHandler,
};
pub use config::Config;
pub use envelope::{Envelope, Meta, FORMAT_VERSION};
pub use error::{Error, Result};
pub use map::Map;
pub use ser::ValueSerializer;
pub use transform::TypeTag;
pub use value::{BigNumber, Number, Value};

use serde::Serialize;
use std::io;

/// Parses envelope text and restores the annotated values.
///
/// # Examples
///
/// ```rust
/// use serde_superjson::parse;
///
/// let text = r#"{"json":{"dates":["2024-01-01T00:00:00.000Z","x"]},"meta":{"values":{"dates.0":["Date"]},"v":1}}"#;
/// let value = parse(text).unwrap();
/// let dates = value.get("dates").and_then(|d| d.as_array()).unwrap();
/// assert!(dates[0].is_date());
/// assert_eq!(dates[1].as_str(), Some("x"));
/// ```
///
/// # Errors
///
/// - [`Error::InvalidJson`] if `text` is not JSON or does not decode to an object
/// - [`Error::InvalidMeta`] if the `json` key is missing or an annotation is malformed
/// - [`Error::UnsupportedType`] if strict big-integer selection fails
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<Value> {
    parse_with_config(text, &Config::default())
}

/// Parses envelope text with custom options.
///
/// # Errors
///
/// See [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_config(text: &str, config: &Config) -> Result<Value> {
    let payload: Value = serde_json::from_str(text)?;
    Envelope::from_value(payload)?.restore(config)
}

/// Parses an envelope from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_superjson::{parse_reader, Config};
/// use std::io::Cursor;
///
/// let bytes = br#"{"json":[1,2,3]}"#;
/// let value = parse_reader(Cursor::new(bytes), &Config::new()).unwrap();
/// assert_eq!(value.as_array().map(Vec::len), Some(3));
/// ```
///
/// # Errors
///
/// Read failures are reported as [`Error::InvalidJson`]; otherwise see [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R>(reader: R, config: &Config) -> Result<Value>
where
    R: io::Read,
{
    let payload: Value = serde_json::from_reader(reader)?;
    Envelope::from_value(payload)?.restore(config)
}

/// Restores an envelope that was already decoded by some other JSON layer.
///
/// Anything serializable is accepted. Inside `json`, keyed containers whose
/// keys are exactly `"0"`, `"1"`, ... in order are treated as sequences.
/// Empty keyed containers stay objects.
///
/// # Examples
///
/// ```rust
/// use serde_superjson::deserialize;
///
/// let upstream = serde_json::json!({
///     "json": { "created": "2024-01-01T00:00:00.000Z" },
///     "meta": { "values": { "created": ["Date"] }, "v": 1 }
/// });
/// let value = deserialize(&upstream).unwrap();
/// assert!(value.get("created").unwrap().is_date());
/// ```
///
/// # Errors
///
/// See [`parse`]. Types the value bridge cannot represent yield
/// [`Error::UnsupportedType`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize<T>(payload: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    deserialize_with_config(payload, &Config::default())
}

/// [`deserialize`] with custom options.
///
/// # Errors
///
/// See [`deserialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize_with_config<T>(payload: &T, config: &Config) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    let mut decoded = Envelope::from_value(to_value(payload)?)?;
    decoded.json = envelope::normalize_sequences(decoded.json);
    decoded.restore(config)
}

/// Emits a typed tree as envelope text.
///
/// # Examples
///
/// ```rust
/// use serde_superjson::{stringify, value};
///
/// let text = stringify(&value!({ "a": 1 })).unwrap();
/// assert_eq!(text, r#"{"json":{"a":1},"meta":{"v":1}}"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if a big integer cannot be rendered by
/// the active handler.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify(value: &Value) -> Result<String> {
    stringify_with_config(value, &Config::default())
}

/// [`stringify`] with custom options.
///
/// # Errors
///
/// See [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_with_config(value: &Value, config: &Config) -> Result<String> {
    let envelope = Envelope::emit(value, config)?;
    Ok(serde_json::to_string(&envelope)?)
}

/// Emits a typed tree as envelope text into a writer.
///
/// # Errors
///
/// Write failures are reported as [`Error::InvalidJson`]; otherwise see
/// [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_to_writer<W>(writer: W, value: &Value, config: &Config) -> Result<()>
where
    W: io::Write,
{
    let envelope = Envelope::emit(value, config)?;
    serde_json::to_writer(writer, &envelope)?;
    Ok(())
}

/// Emits a typed tree as a structured envelope.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use serde_superjson::{serialize, TypeTag, Value};
///
/// let at: Value = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().into();
/// let envelope = serialize(&at).unwrap();
/// assert_eq!(envelope.json, Value::from("2024-01-01T00:00:00.000Z"));
/// assert_eq!(envelope.meta.unwrap().values[""], vec![TypeTag::Date]);
/// ```
///
/// # Errors
///
/// See [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(value: &Value) -> Result<Envelope> {
    serialize_with_config(value, &Config::default())
}

/// [`serialize`] with custom options.
///
/// # Errors
///
/// See [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_config(value: &Value, config: &Config) -> Result<Envelope> {
    Envelope::emit(value, config)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_superjson::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_value(value)
}

//! Type tags and the transforms that restore them.
//!
//! Each annotated path carries a list of [`TypeTag`]s. [`Registry::apply_all`]
//! runs them left to right, feeding each transform the previous one's output.
//! Tags this crate does not understand pass the value through untouched.
//!
//! ```rust
//! use serde_superjson::{Config, TypeTag, Value};
//! use serde_superjson::transform::Registry;
//!
//! let config = Config::new();
//! let registry = Registry::new(&config);
//!
//! let date = registry
//!     .apply(&TypeTag::Date, Value::from("2024-01-01T00:00:00.000Z"))
//!     .unwrap();
//! assert!(date.is_date());
//!
//! let unchanged = registry
//!     .apply(&TypeTag::parse("Map"), Value::from("kept"))
//!     .unwrap();
//! assert_eq!(unchanged, Value::from("kept"));
//! ```

use crate::{Config, Error, Result, Value};
use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::trace;

/// A label naming the rich type a leaf's raw value represents.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// ISO-8601 timestamp string ⇄ timezone-aware instant
    Date,
    /// Decimal integer string ⇄ arbitrary-precision integer
    BigInt,
    /// A value that is absent rather than null
    Undefined,
    /// Any tag without a built-in transform
    Unknown(String),
}

impl TypeTag {
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "Date" => TypeTag::Date,
            "bigint" => TypeTag::BigInt,
            "undefined" => TypeTag::Undefined,
            other => TypeTag::Unknown(other.to_string()),
        }
    }

    /// The wire spelling of the tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Date => "Date",
            TypeTag::BigInt => "bigint",
            TypeTag::Undefined => "undefined",
            TypeTag::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TypeTag {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(TypeTag::parse(&tag))
    }
}

/// Applies type transforms using the handler chosen by a [`Config`].
///
/// The registry itself holds no state beyond the borrowed configuration, so
/// it is cheap to create per call.
#[derive(Clone, Copy, Debug)]
pub struct Registry<'a> {
    config: &'a Config,
}

impl<'a> Registry<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Registry { config }
    }

    /// Applies a single tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMeta`] when a `Date` or `bigint` input is not a
    /// string or cannot be parsed, and propagates handler selection errors.
    pub fn apply(&self, tag: &TypeTag, value: Value) -> Result<Value> {
        match tag {
            TypeTag::Date => restore_date(value),
            TypeTag::BigInt => self.restore_bigint(value),
            TypeTag::Undefined => Ok(Value::Null),
            TypeTag::Unknown(name) => {
                trace!(tag = %name, "no transform registered, leaving value as is");
                Ok(value)
            }
        }
    }

    /// Applies `tags` in order, each consuming the previous output.
    ///
    /// # Errors
    ///
    /// Stops at the first failing transform; see [`Registry::apply`].
    pub fn apply_all(&self, tags: &[TypeTag], value: Value) -> Result<Value> {
        tags.iter().try_fold(value, |acc, tag| self.apply(tag, acc))
    }

    fn restore_bigint(&self, value: Value) -> Result<Value> {
        let digits = match value {
            Value::String(s) => s,
            other => {
                return Err(Error::invalid_meta(format!(
                    "BigInt value must be a string, found {}",
                    other.kind()
                )))
            }
        };
        self.config.big_int_handler()?.parse(&digits)
    }
}

fn restore_date(value: Value) -> Result<Value> {
    let text = match value {
        Value::String(s) => s,
        other => {
            return Err(Error::invalid_meta(format!(
                "Date value must be a string, found {}",
                other.kind()
            )))
        }
    };
    DateTime::parse_from_rfc3339(&text)
        .map(Value::Date)
        .map_err(|e| Error::invalid_meta(format!("Invalid date format {:?}: {}", text, e)))
}

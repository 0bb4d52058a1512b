//! Pluggable arbitrary-precision integer backends.
//!
//! A `bigint` annotation is restored by whichever [`BigIntHandler`] is active
//! for the [`Config`](crate::Config). Three interchangeable handlers exist:
//!
//! | Handler | Backing | `parse` result | Available |
//! |---|---|---|---|
//! | [`IntegerHandler`] | `num-bigint` | `BigNumber::Integer` | `num-bigint` feature |
//! | [`DecimalHandler`] | `bigdecimal` | `BigNumber::Decimal` | `bigdecimal` feature |
//! | [`StringHandler`] | none | the decimal string itself | always |
//!
//! The string handler keeps round-tripping correct but gives up arithmetic.
//! Selection order without an explicit override is integer, decimal, then
//! string; in strict mode the string fallback is refused.
//!
//! ```rust
//! use serde_superjson::bigint::{select, Availability, HandlerKind};
//!
//! let nothing = Availability { integer: false, decimal: false };
//! assert_eq!(select(None, false, nothing).unwrap().kind(), HandlerKind::String);
//! assert!(select(None, true, nothing).is_err());
//! ```

pub(crate) mod decimal;
mod integer;
mod string;

pub use decimal::DecimalHandler;
pub use integer::IntegerHandler;
pub use string::StringHandler;

use crate::{Error, Number, Result, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Identifies a handler implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerKind {
    Integer,
    Decimal,
    String,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Integer => f.write_str("integer"),
            HandlerKind::Decimal => f.write_str("decimal"),
            HandlerKind::String => f.write_str("string"),
        }
    }
}

/// Strategy for parsing and rendering arbitrary-precision integers.
pub trait BigIntHandler: fmt::Debug + Send + Sync {
    /// Which implementation this is.
    fn kind(&self) -> HandlerKind;

    /// Turns a signed decimal integer string into this handler's representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMeta`] if the text is not a decimal integer, or
    /// [`Error::UnsupportedType`] if the backing capability is not compiled in.
    fn parse(&self, digits: &str) -> Result<Value>;

    /// Renders a big integer, plain integer or decimal string as canonical decimal text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for values this handler does not own.
    fn stringify(&self, value: &Value) -> Result<String>;

    /// Capability probe, callable before a handler is constructed.
    fn is_available() -> bool
    where
        Self: Sized;
}

/// Which arithmetic backends can be selected.
///
/// [`Availability::detect`] asks each handler's probe. Tests and embedders can
/// supply their own value to exercise the fallback order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Availability {
    pub integer: bool,
    pub decimal: bool,
}

impl Availability {
    #[must_use]
    pub fn detect() -> Self {
        Availability {
            integer: IntegerHandler::is_available(),
            decimal: DecimalHandler::is_available(),
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::detect()
    }
}

/// Chooses the handler to use.
///
/// An explicit override always wins. Otherwise the integer handler is
/// preferred, then the decimal handler, then (non-strict only) the string
/// handler.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] when `strict` is set and neither
/// arithmetic backend is available.
pub fn select(
    explicit: Option<Arc<dyn BigIntHandler>>,
    strict: bool,
    availability: Availability,
) -> Result<Arc<dyn BigIntHandler>> {
    if let Some(handler) = explicit {
        debug!(handler = %handler.kind(), "using configured big integer handler");
        return Ok(handler);
    }

    let handler: Arc<dyn BigIntHandler> = if availability.integer {
        Arc::new(IntegerHandler)
    } else if availability.decimal {
        Arc::new(DecimalHandler)
    } else if strict {
        return Err(Error::unsupported_type(
            "BigInt requires the num-bigint or bigdecimal backend in strict mode",
        ));
    } else {
        Arc::new(StringHandler)
    };

    debug!(handler = %handler.kind(), strict, "selected big integer handler");
    Ok(handler)
}

/// Canonical form of a `[+-]?[0-9]+` string: no `+`, no leading zeros, no `-0`.
/// Returns `None` for anything else.
pub(crate) fn canonical_decimal(digits: &str) -> Option<String> {
    let (negative, unsigned) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits.strip_prefix('+').unwrap_or(digits)),
    };
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let trimmed = unsigned.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some("0".to_string());
    }
    Some(if negative {
        format!("-{}", trimmed)
    } else {
        trimmed.to_string()
    })
}

pub(crate) fn invalid_digits(digits: &str) -> Error {
    Error::invalid_meta(format!("Invalid BigInt format: {:?}", digits))
}

/// Renders the plain inputs every arithmetic handler accepts: native
/// integers and decimal strings.
pub(crate) fn stringify_plain(value: &Value, handler: HandlerKind) -> Result<String> {
    match value {
        Value::Number(Number::Integer(i)) => Ok(i.to_string()),
        Value::String(s) => canonical_decimal(s).ok_or_else(|| {
            Error::unsupported_type(format!(
                "{} handler cannot stringify {:?}: not a decimal integer",
                handler, s
            ))
        }),
        other => Err(Error::unsupported_type(format!(
            "{} handler cannot stringify a {} value",
            handler,
            other.kind()
        ))),
    }
}

/// Error for a big integer produced by a different backend.
pub(crate) fn foreign_value(handler: HandlerKind, value: &crate::BigNumber) -> Error {
    Error::unsupported_type(format!(
        "{} handler does not accept values produced by the {} backend",
        handler,
        value.backend_name()
    ))
}

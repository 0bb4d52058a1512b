use super::{canonical_decimal, invalid_digits, stringify_plain, BigIntHandler, HandlerKind};
use crate::{Result, Value};

/// Big integers backed by `num-bigint`, with full arithmetic support.
///
/// ```rust
/// # #[cfg(feature = "num-bigint")]
/// # {
/// use serde_superjson::{BigIntHandler, IntegerHandler, Value};
///
/// let handler = IntegerHandler;
/// let parsed = handler.parse("-9007199254741992").unwrap();
/// assert_eq!(handler.stringify(&parsed).unwrap(), "-9007199254741992");
/// assert_eq!(handler.stringify(&Value::from(123)).unwrap(), "123");
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerHandler;

impl BigIntHandler for IntegerHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Integer
    }

    fn parse(&self, digits: &str) -> Result<Value> {
        let canonical = canonical_decimal(digits).ok_or_else(|| invalid_digits(digits))?;
        parse_canonical(&canonical)
    }

    fn stringify(&self, value: &Value) -> Result<String> {
        match value {
            #[cfg(feature = "num-bigint")]
            Value::BigInt(crate::BigNumber::Integer(n)) => Ok(n.to_string()),
            #[cfg(feature = "bigdecimal")]
            Value::BigInt(other) => Err(super::foreign_value(HandlerKind::Integer, other)),
            other => stringify_plain(other, HandlerKind::Integer),
        }
    }

    fn is_available() -> bool {
        cfg!(feature = "num-bigint")
    }
}

#[cfg(feature = "num-bigint")]
fn parse_canonical(canonical: &str) -> Result<Value> {
    let n: num_bigint::BigInt = canonical
        .parse()
        .map_err(|e| crate::Error::invalid_meta(format!("Invalid BigInt {:?}: {}", canonical, e)))?;
    Ok(Value::BigInt(crate::BigNumber::Integer(n)))
}

#[cfg(not(feature = "num-bigint"))]
fn parse_canonical(_canonical: &str) -> Result<Value> {
    Err(crate::Error::unsupported_type(
        "num-bigint support is not compiled in",
    ))
}

use super::{canonical_decimal, invalid_digits, stringify_plain, BigIntHandler, HandlerKind};
use crate::{Result, Value};

/// Big integers backed by `bigdecimal`, held at scale 0.
///
/// A drop-in substitute for [`IntegerHandler`](crate::IntegerHandler) from
/// the caller's point of view. Values produced by the integer handler are
/// refused rather than converted.
///
/// ```rust
/// # #[cfg(feature = "bigdecimal")]
/// # {
/// use serde_superjson::{BigIntHandler, DecimalHandler};
///
/// let handler = DecimalHandler;
/// let parsed = handler.parse("00042").unwrap();
/// assert_eq!(handler.stringify(&parsed).unwrap(), "42");
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DecimalHandler;

impl BigIntHandler for DecimalHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Decimal
    }

    fn parse(&self, digits: &str) -> Result<Value> {
        let canonical = canonical_decimal(digits).ok_or_else(|| invalid_digits(digits))?;
        parse_canonical(&canonical)
    }

    fn stringify(&self, value: &Value) -> Result<String> {
        match value {
            #[cfg(feature = "bigdecimal")]
            Value::BigInt(crate::BigNumber::Decimal(d)) => Ok(render(d)),
            #[cfg(feature = "num-bigint")]
            Value::BigInt(other) => Err(super::foreign_value(HandlerKind::Decimal, other)),
            other => stringify_plain(other, HandlerKind::Decimal),
        }
    }

    fn is_available() -> bool {
        cfg!(feature = "bigdecimal")
    }
}

/// Integer digits of a decimal, without exponent notation.
#[cfg(feature = "bigdecimal")]
pub(crate) fn render(d: &bigdecimal::BigDecimal) -> String {
    let (digits, _) = d.with_scale(0).as_bigint_and_exponent();
    digits.to_string()
}

#[cfg(feature = "bigdecimal")]
fn parse_canonical(canonical: &str) -> Result<Value> {
    use std::str::FromStr;

    let d = bigdecimal::BigDecimal::from_str(canonical)
        .map_err(|e| crate::Error::invalid_meta(format!("Invalid BigInt {:?}: {}", canonical, e)))?;
    Ok(Value::BigInt(crate::BigNumber::Decimal(d)))
}

#[cfg(not(feature = "bigdecimal"))]
fn parse_canonical(_canonical: &str) -> Result<Value> {
    Err(crate::Error::unsupported_type(
        "bigdecimal support is not compiled in",
    ))
}

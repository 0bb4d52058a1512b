use super::{BigIntHandler, HandlerKind};
use crate::{Error, Number, Result, Value};

/// String-only fallback: no arithmetic, always available.
///
/// `parse` hands back the decimal text unchanged as a [`Value::String`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StringHandler;

impl BigIntHandler for StringHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::String
    }

    fn parse(&self, digits: &str) -> Result<Value> {
        Ok(Value::String(digits.to_string()))
    }

    fn stringify(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(Number::Integer(i)) => Ok(i.to_string()),
            // num-bigint values are accepted when that backend is compiled in
            #[cfg(feature = "num-bigint")]
            Value::BigInt(crate::BigNumber::Integer(n)) => Ok(n.to_string()),
            #[cfg(feature = "bigdecimal")]
            Value::BigInt(other) => Err(super::foreign_value(HandlerKind::String, other)),
            other => Err(Error::unsupported_type(format!(
                "string handler cannot stringify a {} value",
                other.kind()
            ))),
        }
    }

    fn is_available() -> bool {
        true
    }
}

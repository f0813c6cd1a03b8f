use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Value;

/// The primitive shape of a canonical value or attribute slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// A UTF-8 string.
    String,
    /// A signed 64-bit integer.
    Integer,
    /// A 64-bit floating point number.
    Float,
    /// A boolean.
    Boolean,
}

impl Shape {
    /// Returns the name of the shape.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }

    /// Returns the zero value of this shape.
    pub fn zero(self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Integer => Value::I64(0),
            Self::Float => Value::F64(0.0),
            Self::Boolean => Value::Bool(false),
        }
    }

    /// Returns `true` if the value is stored in the canonical variant of this shape.
    ///
    /// Unsigned integers are not canonical for [`Shape::Integer`], since slots and validators
    /// always hold `i64`.
    pub fn is_canonical(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Integer, Value::I64(_))
                | (Self::Float, Value::F64(_))
                | (Self::Boolean, Value::Bool(_))
        )
    }

    /// Converts the value into this shape, falling back to the zero value.
    ///
    /// Applies the rules of [`coerce`](Self::coerce), but every value that cannot be converted
    /// yields [`zero`](Self::zero) instead of an error.
    pub fn coerce_lossy(self, value: &Value) -> Value {
        self.coerce(value.clone()).unwrap_or_else(|_| self.zero())
    }

    /// Converts the value into this shape, or fails without a partial result.
    ///
    /// Numeric strings are parsed as decimal numbers, every value converts to a string through its
    /// textual form, and only the strings `"true"` and `"false"` convert to booleans. Floats
    /// convert to integers by truncation. Unsigned integers out of range, non-finite floats and
    /// unparsable strings are errors. Booleans never convert to numbers.
    pub fn coerce(self, value: Value) -> Result<Value, CoercionError> {
        let coerced = match (self, &value) {
            (Self::String, Value::String(_)) => return Ok(value),
            (Self::String, other) => Some(Value::String(other.to_string())),
            (Self::Integer, Value::Bool(_)) => None,
            (Self::Integer, other) => lossy_i64(other).map(Value::I64),
            (Self::Float, Value::String(s)) => s.parse().ok().and_then(finite).map(Value::F64),
            (Self::Float, other) => other.as_f64().and_then(finite).map(Value::F64),
            (Self::Boolean, other) => parse_bool(other).map(Value::Bool),
        };

        coerced.ok_or_else(|| CoercionError {
            expected: self,
            found: value.describe().to_string(),
        })
    }
}

fn lossy_i64(value: &Value) -> Option<i64> {
    match value {
        Value::I64(_) | Value::U64(_) => value.as_i64(),
        Value::F64(v) => float_to_i64(*v),
        Value::String(s) => s.parse().ok(),
        Value::Bool(_) => None,
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn float_to_i64(value: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, which itself is out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && in_range).then(|| value.trunc() as i64)
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Shape`] name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown shape")]
pub struct ParseShapeError;

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "string" => Self::String,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "boolean" => Self::Boolean,
            _ => return Err(ParseShapeError),
        })
    }
}

/// Error returned by [`Shape::coerce`] when a value cannot be represented in the target shape.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("cannot convert {found} to {expected}")]
pub struct CoercionError {
    /// The shape the value should have been converted to.
    pub expected: Shape,
    /// Description of the rejected value.
    pub found: String,
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_lossy_to_string() {
        assert_eq!(Shape::String.coerce_lossy(&Value::I64(443)), Value::from("443"));
        assert_eq!(Shape::String.coerce_lossy(&Value::Bool(true)), Value::from("true"));
        assert_eq!(Shape::String.coerce_lossy(&Value::F64(2.5)), Value::from("2.5"));
    }

    #[test]
    fn test_lossy_to_integer() {
        assert_eq!(Shape::Integer.coerce_lossy(&Value::from("42")), Value::I64(42));
        assert_eq!(Shape::Integer.coerce_lossy(&Value::from("4.2")), Value::I64(0));
        assert_eq!(Shape::Integer.coerce_lossy(&Value::F64(-7.9)), Value::I64(-7));
        assert_eq!(Shape::Integer.coerce_lossy(&Value::U64(u64::MAX)), Value::I64(0));
        assert_eq!(Shape::Integer.coerce_lossy(&Value::F64(f64::NAN)), Value::I64(0));
        assert_eq!(Shape::Integer.coerce_lossy(&Value::Bool(true)), Value::I64(0));
    }

    #[test]
    fn test_lossy_to_float() {
        assert_eq!(Shape::Float.coerce_lossy(&Value::from("40.5")), Value::F64(40.5));
        assert_eq!(Shape::Float.coerce_lossy(&Value::I64(3)), Value::F64(3.0));
        assert_eq!(Shape::Float.coerce_lossy(&Value::from("north")), Value::F64(0.0));
        assert_eq!(Shape::Float.coerce_lossy(&Value::from("NaN")), Value::F64(0.0));
    }

    #[test]
    fn test_lossy_to_boolean() {
        assert_eq!(Shape::Boolean.coerce_lossy(&Value::from("true")), Value::Bool(true));
        assert_eq!(Shape::Boolean.coerce_lossy(&Value::from("TRUE")), Value::Bool(false));
        assert_eq!(Shape::Boolean.coerce_lossy(&Value::I64(1)), Value::Bool(false));
    }

    #[test]
    fn test_strict_coercion() {
        assert_eq!(Shape::Integer.coerce(Value::F64(12.99)), Ok(Value::I64(12)));
        assert_eq!(Shape::Integer.coerce(Value::U64(5)), Ok(Value::I64(5)));
        assert_eq!(Shape::Float.coerce(Value::from("1e3")), Ok(Value::F64(1000.0)));
        assert_eq!(Shape::String.coerce(Value::I64(1)), Ok(Value::from("1")));
    }

    #[test]
    fn test_strict_coercion_errors() {
        let err = Shape::Integer.coerce(Value::from("eight")).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert string \"eight\" to integer");

        assert!(Shape::Integer.coerce(Value::Bool(true)).is_err());
        assert!(Shape::Integer.coerce(Value::F64(f64::INFINITY)).is_err());
        assert!(Shape::Integer.coerce(Value::F64(1e20)).is_err());
        assert!(Shape::Float.coerce(Value::Bool(false)).is_err());
        assert!(Shape::Boolean.coerce(Value::from("yes")).is_err());
    }

    #[test]
    fn test_strict_float_must_be_finite() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity", "1e400"] {
            assert!(Shape::Float.coerce(Value::from(raw)).is_err(), "{raw}");
        }
        assert!(Shape::Float.coerce(Value::F64(f64::NAN)).is_err());
        assert!(Shape::Float.coerce(Value::F64(f64::NEG_INFINITY)).is_err());
        assert_eq!(Shape::Float.coerce(Value::F64(-33.9)), Ok(Value::F64(-33.9)));
    }

    #[test]
    fn test_zero() {
        assert_eq!(Shape::String.zero(), Value::from(""));
        assert_eq!(Shape::Integer.coerce_lossy(&Value::from("n/a")), Shape::Integer.zero());
    }

    #[test]
    fn test_is_canonical() {
        assert!(Shape::Integer.is_canonical(&Value::I64(1)));
        assert!(!Shape::Integer.is_canonical(&Value::U64(1)));
        assert!(!Shape::Float.is_canonical(&Value::I64(1)));
    }

    #[test]
    fn test_parse_roundtrip() {
        for shape in [Shape::String, Shape::Integer, Shape::Float, Shape::Boolean] {
            assert_eq!(shape.as_str().parse::<Shape>(), Ok(shape));
        }
        assert_eq!("int".parse::<Shape>(), Err(ParseShapeError));
    }
}

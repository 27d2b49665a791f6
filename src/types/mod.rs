//! Input values supplied by callers and their conversion into field elements
//!
//! An [`Assignment`] maps input wire names to [`InputValue`]s. Values are
//! converted through the narrow [`ToField`] interface, so a value that cannot
//! be represented fails with a typed [`ConversionError`] instead of being
//! silently coerced.
//!
//! # Usage
//!
//! ```
//! use r1cs_solver::types::{Assignment, InputValue, ToField};
//! use p3_baby_bear::BabyBear;
//!
//! let mut assignment = Assignment::new();
//! assignment.insert("x".into(), InputValue::from(3u64));
//! assignment.insert("y".into(), InputValue::from("0x10"));
//!
//! let y: BabyBear = assignment["y"].to_field().unwrap();
//! assert_eq!(y, 16u64.to_field::<BabyBear>().unwrap());
//! ```

use std::collections::HashMap;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::SolverField;

/// Reserved name of the constant-one public wire.
pub const ONE_WIRE: &str = "ONE_WIRE";

/// Input assignment: wire name to external value.
pub type Assignment = HashMap<String, InputValue>;

// ============================================================================
// Input values
// ============================================================================

/// An externally supplied input value.
///
/// Untagged so assignment files can mix JSON numbers, strings and byte arrays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// Unsigned integer, reduced into the field
    Uint(u64),
    /// Signed integer; negative values map to the field negation of their magnitude
    Int(i64),
    /// Decimal or `0x`-prefixed hexadecimal integer, optionally negative
    Text(String),
    /// Big-endian integer bytes, reduced into the field
    Bytes(Vec<u8>),
}

impl From<u64> for InputValue {
    fn from(value: u64) -> Self {
        InputValue::Uint(value)
    }
}

impl From<u32> for InputValue {
    fn from(value: u32) -> Self {
        InputValue::Uint(value as u64)
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        InputValue::Int(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

impl From<Vec<u8>> for InputValue {
    fn from(value: Vec<u8>) -> Self {
        InputValue::Bytes(value)
    }
}

impl From<&BigUint> for InputValue {
    fn from(value: &BigUint) -> Self {
        InputValue::Bytes(value.to_bytes_be())
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Failure to convert an external value into a field element
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("empty numeric string")]
    Empty,

    #[error("invalid integer literal {0:?}")]
    InvalidLiteral(String),
}

/// Conversion of an external value into a field element.
pub trait ToField {
    fn to_field<F: SolverField>(&self) -> Result<F, ConversionError>;
}

impl ToField for u64 {
    fn to_field<F: SolverField>(&self) -> Result<F, ConversionError> {
        Ok(F::reduce_u64(*self))
    }
}

impl ToField for i64 {
    fn to_field<F: SolverField>(&self) -> Result<F, ConversionError> {
        let magnitude = F::reduce_u64(self.unsigned_abs());
        Ok(if *self < 0 { -magnitude } else { magnitude })
    }
}

impl ToField for str {
    fn to_field<F: SolverField>(&self) -> Result<F, ConversionError> {
        let trimmed = self.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if digits.is_empty() {
            return Err(ConversionError::Empty);
        }

        let parsed = match digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
        {
            Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
            None => BigUint::parse_bytes(digits.as_bytes(), 10),
        };
        let value = parsed.ok_or_else(|| ConversionError::InvalidLiteral(self.to_string()))?;

        let element = F::reduce_biguint(&value);
        Ok(if negative { -element } else { element })
    }
}

impl<T: ToField + ?Sized> ToField for &T {
    fn to_field<F: SolverField>(&self) -> Result<F, ConversionError> {
        (**self).to_field()
    }
}

impl ToField for InputValue {
    fn to_field<F: SolverField>(&self) -> Result<F, ConversionError> {
        match self {
            InputValue::Uint(v) => v.to_field(),
            InputValue::Int(v) => v.to_field(),
            InputValue::Text(s) => s.as_str().to_field(),
            InputValue::Bytes(bytes) => Ok(F::reduce_be_bytes(bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p3_baby_bear::BabyBear;
    use p3_field::FieldAlgebra;

    type F = BabyBear;

    fn conv(v: impl Into<InputValue>) -> Result<F, ConversionError> {
        v.into().to_field()
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(conv(3u64).unwrap(), F::from_canonical_u32(3));
        assert_eq!(conv(-1i64).unwrap(), F::NEG_ONE);
        assert_eq!(conv(i64::MIN).unwrap(), -F::reduce_u64(1u64 << 63));
    }

    #[test]
    fn test_string_values() {
        assert_eq!(conv("42").unwrap(), F::from_canonical_u32(42));
        assert_eq!(conv("0x2a").unwrap(), F::from_canonical_u32(42));
        assert_eq!(conv(" -7 ").unwrap(), -F::from_canonical_u32(7));
        assert_eq!(conv("").unwrap_err(), ConversionError::Empty);
        assert_eq!(conv("-").unwrap_err(), ConversionError::Empty);
        assert!(matches!(
            conv("12abc").unwrap_err(),
            ConversionError::InvalidLiteral(_)
        ));
    }

    #[test]
    fn test_byte_values() {
        assert_eq!(conv(vec![1u8, 0]).unwrap(), F::from_canonical_u32(256));
        let big = BigUint::from(1234567u32);
        assert_eq!(conv(&big).unwrap(), F::from_canonical_u32(1234567));
    }

    #[test]
    fn test_untagged_json() {
        let parsed: Assignment =
            serde_json::from_str(r#"{"a": 5, "b": -2, "c": "0x10", "d": [1, 0]}"#).unwrap();
        assert_eq!(parsed["a"], InputValue::Uint(5));
        assert_eq!(parsed["b"], InputValue::Int(-2));
        assert_eq!(parsed["c"], InputValue::Text("0x10".into()));
        assert_eq!(parsed["d"], InputValue::Bytes(vec![1, 0]));
    }
}

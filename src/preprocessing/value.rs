//! Cell values of categorical arrays.

use crate::preprocessing::error::PreprocessingError;
use polars::prelude::AnyValue;
use std::cmp::Ordering;
use std::fmt;

/// A single cell taken out of a table column.
///
/// Values are totally ordered so that the distinct values of a column can be
/// sorted and deduplicated:
/// - booleans sort before numbers, numbers before strings;
/// - integers and floats compare by exact numeric value (`Int(1) == Float(1.0)`),
///   without rounding the integer to `f64`;
/// - `-0.0 == 0.0`, and NaN sorts after every number and equals itself.
#[derive(Clone, Debug)]
pub enum Value {
    /// Signed integer cell.
    Int(i64),
    /// Floating point cell.
    Float(f64),
    /// Boolean cell.
    Bool(bool),
    /// String cell.
    Str(String),
}

impl Value {
    /// Numeric view of the value, if it has one.
    ///
    /// Booleans map to `0.0` / `1.0`; strings have no numeric view.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Str(_) => None,
        }
    }

    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Str(_) => 2,
        }
    }
}

// 2^63, the first float above every i64.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

fn cmp_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // neither is NaN, and partial_cmp treats -0.0 and 0.0 as equal
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= I64_END {
        return Ordering::Less;
    }
    if f < -I64_END {
        return Ordering::Greater;
    }
    // f is in [-2^63, 2^63), so its integer part fits an i64 exactly
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => cmp_floats(whole, f),
        other => other,
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => cmp_floats(*a, *b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            // -0.0 prints as "0", matching the value it equals
            Value::Float(v) if *v == 0.0 => f.write_str("0"),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// Convert a polars cell.
///
/// # Errors
/// [`PreprocessingError::InvalidInput`] for nulls, unsigned integers above
/// `i64::MAX` and cell types with no [`Value`] counterpart (dates, lists, ...).
impl TryFrom<AnyValue<'_>> for Value {
    type Error = PreprocessingError;

    fn try_from(cell: AnyValue<'_>) -> Result<Self, Self::Error> {
        match cell {
            AnyValue::Boolean(v) => Ok(Value::Bool(v)),
            AnyValue::Int32(v) => Ok(Value::Int(v as i64)),
            AnyValue::Int64(v) => Ok(Value::Int(v)),
            AnyValue::UInt32(v) => Ok(Value::Int(v as i64)),
            AnyValue::UInt64(v) => i64::try_from(v).map(Value::Int).map_err(|_| {
                PreprocessingError::InvalidInput(format!("{} does not fit an i64", v))
            }),
            AnyValue::Float32(v) => Ok(Value::Float(v as f64)),
            AnyValue::Float64(v) => Ok(Value::Float(v)),
            AnyValue::String(v) => Ok(Value::Str(v.to_string())),
            AnyValue::StringOwned(v) => Ok(Value::Str(v.as_str().to_string())),
            AnyValue::Null => Err(PreprocessingError::InvalidInput(
                "missing value".to_string(),
            )),
            other => {
                let dtype = other.dtype();
                if dtype.is_integer() {
                    other.extract::<i64>().map(Value::Int).ok_or_else(|| {
                        PreprocessingError::InvalidInput(format!("{} does not fit an i64", other))
                    })
                } else {
                    Err(PreprocessingError::InvalidInput(format!(
                        "unsupported cell type {}",
                        dtype
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_numeric_equality_across_types() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert!(Value::Int(1) < Value::Float(1.5));
        assert!(Value::Float(-0.5) < Value::Int(0));
        assert!(Value::Int(-1) < Value::Float(-0.5));
    }

    #[test]
    fn test_value_large_ints_compare_exactly_against_floats() {
        let big = 1i64 << 53;
        let f = Value::Float(big as f64);

        assert_eq!(Value::Int(big), f);
        assert!(Value::Int(big + 1) > f);
        assert!(f < Value::Int(big + 1));
        assert!(Value::Int(big - 1) < f);

        assert!(Value::Int(i64::MAX) < Value::Float(I64_END));
        assert!(Value::Int(i64::MIN) == Value::Float(-I64_END));
        assert!(Value::Int(i64::MIN) > Value::Float(f64::NEG_INFINITY));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_value_negative_zero_equals_zero() {
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
        assert_eq!(Value::Float(-0.0), Value::Int(0));
        assert_eq!(Value::Float(-0.0).to_string(), "0");
    }

    #[test]
    fn test_value_rank_ordering() {
        let mut values = vec![
            Value::from("b"),
            Value::Int(3),
            Value::Bool(true),
            Value::from("a"),
            Value::Float(2.5),
            Value::Bool(false),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Bool(false),
                Value::Bool(true),
                Value::Float(2.5),
                Value::Int(3),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_value_nan_sorts_last_and_equals_itself() {
        let mut values = vec![
            Value::Float(f64::NAN),
            Value::Float(1.0),
            Value::Int(i64::MAX),
            Value::Int(0),
        ];
        values.sort();
        assert_eq!(values[0], Value::Int(0));
        assert_eq!(values[1], Value::Float(1.0));
        assert_eq!(values[2], Value::Int(i64::MAX));
        assert_eq!(values[3], Value::Float(f64::NAN));
        assert_eq!(Value::Float(f64::NAN), Value::Float(-f64::NAN));
    }

    #[test]
    fn test_value_as_f64() {
        assert_eq!(Value::Int(4).as_f64(), Some(4.0));
        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::from("x").as_f64(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::from("female").to_string(), "female");
    }

    #[test]
    fn test_value_from_any_value() {
        assert_eq!(Value::try_from(AnyValue::Int64(3)).unwrap(), Value::Int(3));
        assert_eq!(Value::try_from(AnyValue::Int32(-2)).unwrap(), Value::Int(-2));
        assert_eq!(Value::try_from(AnyValue::UInt32(5)).unwrap(), Value::Int(5));
        assert_eq!(Value::try_from(AnyValue::Float64(0.5)).unwrap(), Value::Float(0.5));
        assert_eq!(Value::try_from(AnyValue::Boolean(true)).unwrap(), Value::Bool(true));
        assert_eq!(Value::try_from(AnyValue::String("C")).unwrap(), Value::from("C"));
    }

    #[test]
    fn test_value_from_any_value_rejects() {
        assert!(matches!(
            Value::try_from(AnyValue::Null),
            Err(PreprocessingError::InvalidInput(_))
        ));
        assert!(matches!(
            Value::try_from(AnyValue::UInt64(u64::MAX)),
            Err(PreprocessingError::InvalidInput(_))
        ));
    }
}

//! Cell values for columnar frames
//!
//! One `Value` is one cell of one column. Columns are homogeneously typed,
//! so in practice every non-null value in a column shares a variant; the
//! enum exists so frames, defaults, and diagnostics can move single cells
//! around without a type parameter.
//!
//! Equality and hashing are total: floats compare and hash by bit pattern
//! (NaN equals NaN), so duplicate detection never loses rows. Ordering is
//! total as well, with null sorting first.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::schema::DataType;

/// A single cell value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Date(NaiveDate),
    Datetime(NaiveDateTime),
    Time(NaiveTime),
    /// Elapsed time in microseconds
    Duration(i64),
    Decimal(BigDecimal),
    Binary(Vec<u8>),
    List(Vec<Value>),
    Struct(Vec<(String, Value)>),
}

impl Value {
    /// Returns the value's type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::UInt8(_) => "uint8",
            Value::UInt16(_) => "uint16",
            Value::UInt32(_) => "uint32",
            Value::UInt64(_) => "uint64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Datetime(_) => "datetime",
            Value::Time(_) => "time",
            Value::Duration(_) => "duration",
            Value::Decimal(_) => "decimal",
            Value::Binary(_) => "binary",
            Value::List(_) => "list",
            Value::Struct(_) => "struct",
        }
    }

    /// Whether the cell is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this cell is a legal inhabitant of a column of `dtype`.
    ///
    /// Null inhabits every column; whether nulls are *permitted* is the
    /// nullability pass's concern, not a typing question. `Object` columns
    /// accept anything.
    pub fn matches(&self, dtype: &DataType) -> bool {
        match (self, dtype) {
            (Value::Null, _) => true,
            (_, DataType::Object) => true,
            (Value::Boolean(_), DataType::Boolean) => true,
            (Value::Int8(_), DataType::Int8) => true,
            (Value::Int16(_), DataType::Int16) => true,
            (Value::Int32(_), DataType::Int32) => true,
            (Value::Int64(_), DataType::Int64) => true,
            (Value::UInt8(_), DataType::UInt8) => true,
            (Value::UInt16(_), DataType::UInt16) => true,
            (Value::UInt32(_), DataType::UInt32) => true,
            (Value::UInt64(_), DataType::UInt64) => true,
            (Value::Float32(_), DataType::Float32) => true,
            (Value::Float64(_), DataType::Float64) => true,
            (Value::String(_), DataType::String) => true,
            (Value::String(s), DataType::Enum(labels)) => labels.iter().any(|l| l == s),
            (Value::Date(_), DataType::Date) => true,
            (Value::Datetime(_), DataType::Datetime(_)) => true,
            (Value::Time(_), DataType::Time) => true,
            (Value::Duration(_), DataType::Duration) => true,
            (Value::Decimal(_), DataType::Decimal) => true,
            (Value::Binary(_), DataType::Binary) => true,
            (Value::List(items), DataType::List(inner)) => {
                items.iter().all(|v| v.matches(inner))
            }
            (Value::Struct(fields), DataType::Struct(schema)) => {
                fields.len() == schema.len()
                    && fields
                        .iter()
                        .zip(schema.iter())
                        .all(|((name, value), (col, dtype))| name == col && value.matches(dtype))
            }
            _ => false,
        }
    }

    /// Total ordering across cells of one column, null first.
    ///
    /// Cells of different variants (which a well-typed column never holds)
    /// fall back to a fixed variant rank so the ordering stays total.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        use Value::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Int8(a), Int8(b)) => a.cmp(b),
            (Int16(a), Int16(b)) => a.cmp(b),
            (Int32(a), Int32(b)) => a.cmp(b),
            (Int64(a), Int64(b)) => a.cmp(b),
            (UInt8(a), UInt8(b)) => a.cmp(b),
            (UInt16(a), UInt16(b)) => a.cmp(b),
            (UInt32(a), UInt32(b)) => a.cmp(b),
            (UInt64(a), UInt64(b)) => a.cmp(b),
            (Float32(a), Float32(b)) => a.total_cmp(b),
            (Float64(a), Float64(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Datetime(a), Datetime(b)) => a.cmp(b),
            (Time(a), Time(b)) => a.cmp(b),
            (Duration(a), Duration(b)) => a.cmp(b),
            (Decimal(a), Decimal(b)) => a.cmp(b),
            (Binary(a), Binary(b)) => a.cmp(b),
            (List(a), List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.total_cmp(y) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                a.len().cmp(&b.len())
            }
            (Struct(a), Struct(b)) => {
                for ((an, av), (bn, bv)) in a.iter().zip(b.iter()) {
                    match an.cmp(bn) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                    match av.total_cmp(bv) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                }
                a.len().cmp(&b.len())
            }
            (a, b) => variant_rank(a).cmp(&variant_rank(b)),
        }
    }
}

fn variant_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Boolean(_) => 1,
        Value::Int8(_) => 2,
        Value::Int16(_) => 3,
        Value::Int32(_) => 4,
        Value::Int64(_) => 5,
        Value::UInt8(_) => 6,
        Value::UInt16(_) => 7,
        Value::UInt32(_) => 8,
        Value::UInt64(_) => 9,
        Value::Float32(_) => 10,
        Value::Float64(_) => 11,
        Value::String(_) => 12,
        Value::Date(_) => 13,
        Value::Datetime(_) => 14,
        Value::Time(_) => 15,
        Value::Duration(_) => 16,
        Value::Decimal(_) => 17,
        Value::Binary(_) => 18,
        Value::List(_) => 19,
        Value::Struct(_) => 20,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Int8(a), Int8(b)) => a == b,
            (Int16(a), Int16(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (UInt8(a), UInt8(b)) => a == b,
            (UInt16(a), UInt16(b)) => a == b,
            (UInt32(a), UInt32(b)) => a == b,
            (UInt64(a), UInt64(b)) => a == b,
            // Bitwise: NaN == NaN, so duplicate detection is total
            (Float32(a), Float32(b)) => a.to_bits() == b.to_bits(),
            (Float64(a), Float64(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (Date(a), Date(b)) => a == b,
            (Datetime(a), Datetime(b)) => a == b,
            (Time(a), Time(b)) => a == b,
            (Duration(a), Duration(b)) => a == b,
            (Decimal(a), Decimal(b)) => a == b,
            (Binary(a), Binary(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Struct(a), Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        variant_rank(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(v) => v.hash(state),
            Value::Int8(v) => v.hash(state),
            Value::Int16(v) => v.hash(state),
            Value::Int32(v) => v.hash(state),
            Value::Int64(v) => v.hash(state),
            Value::UInt8(v) => v.hash(state),
            Value::UInt16(v) => v.hash(state),
            Value::UInt32(v) => v.hash(state),
            Value::UInt64(v) => v.hash(state),
            Value::Float32(v) => v.to_bits().hash(state),
            Value::Float64(v) => v.to_bits().hash(state),
            Value::String(v) => v.hash(state),
            Value::Date(v) => v.hash(state),
            Value::Datetime(v) => v.hash(state),
            Value::Time(v) => v.hash(state),
            Value::Duration(v) => v.hash(state),
            // Normalized so 1.0 and 1.00 hash alike, matching equality
            Value::Decimal(v) => v.normalized().to_string().hash(state),
            Value::Binary(v) => v.hash(state),
            Value::List(v) => v.hash(state),
            Value::Struct(v) => v.hash(state),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt8(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Datetime(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::Duration(v) => write!(f, "{}us", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Binary(v) => write!(f, "binary[{} bytes]", v.len()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DataType, Schema};

    #[test]
    fn test_nan_equals_nan() {
        assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
        assert_ne!(Value::Float64(f64::NAN), Value::Float64(0.0));
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(
            Value::Null.total_cmp(&Value::Int64(i64::MIN)),
            Ordering::Less
        );
        assert_eq!(Value::Null.total_cmp(&Value::Null), Ordering::Equal);
    }

    #[test]
    fn test_null_inhabits_any_column() {
        assert!(Value::Null.matches(&DataType::Int64));
        assert!(Value::Null.matches(&DataType::String));
    }

    #[test]
    fn test_enum_cells_restricted_to_labels() {
        let dtype = DataType::Enum(vec!["a".into(), "b".into()]);
        assert!(Value::String("a".into()).matches(&dtype));
        assert!(!Value::String("c".into()).matches(&dtype));
    }

    #[test]
    fn test_object_accepts_anything() {
        assert!(Value::Int64(1).matches(&DataType::Object));
        assert!(Value::Binary(vec![1, 2]).matches(&DataType::Object));
    }

    #[test]
    fn test_list_cells_checked_elementwise() {
        let dtype = DataType::List(Box::new(DataType::Int64));
        assert!(Value::List(vec![Value::Int64(1), Value::Null]).matches(&dtype));
        assert!(!Value::List(vec![Value::Int64(1), Value::String("x".into())]).matches(&dtype));
    }

    #[test]
    fn test_struct_cells_checked_by_name_and_order() {
        let dtype = DataType::Struct(Schema::new(vec![
            ("x".to_string(), DataType::Int64),
            ("y".to_string(), DataType::String),
        ]));
        let ok = Value::Struct(vec![
            ("x".to_string(), Value::Int64(1)),
            ("y".to_string(), Value::String("a".into())),
        ]);
        assert!(ok.matches(&dtype));

        let reordered = Value::Struct(vec![
            ("y".to_string(), Value::String("a".into())),
            ("x".to_string(), Value::Int64(1)),
        ]);
        assert!(!reordered.matches(&dtype));
    }

    #[test]
    fn test_decimal_equality_ignores_scale() {
        use std::str::FromStr;
        let a = Value::Decimal(BigDecimal::from_str("1.0").unwrap());
        let b = Value::Decimal(BigDecimal::from_str("1.00").unwrap());
        assert_eq!(a, b);
    }
}

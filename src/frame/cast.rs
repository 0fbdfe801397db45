//! Cast kernels
//!
//! Strict cell-by-cell casting used by the coercion pass. Nulls survive
//! every cast; anything the kernel cannot represent exactly enough is a
//! failure naming the column and both types, never a silent lossy guess
//! (float to integer truncates, matching the usual columnar cast, but
//! out-of-range and non-finite values fail).

use crate::schema::DataType;
use crate::table::{TableError, TableResult};
use crate::value::Value;

use super::column::Column;

/// Casts one column to a target type, producing a new column.
pub(crate) fn cast_column(column: &Column, to: &DataType) -> TableResult<Column> {
    if column.dtype() == to {
        return Ok(column.clone());
    }

    let mut values = Vec::with_capacity(column.height());
    for value in column.values() {
        let cast = cast_value(value, to).map_err(|reason| TableError::Cast {
            column: column.name().to_string(),
            from: column.dtype().clone(),
            to: to.clone(),
            reason,
        })?;
        values.push(cast);
    }

    Ok(Column::from_cast(
        column.name().to_string(),
        to.clone(),
        values,
    ))
}

/// Casts a single cell. The error is the human-readable reason.
fn cast_value(value: &Value, to: &DataType) -> Result<Value, String> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    if value.matches(to) {
        return Ok(value.clone());
    }

    match to {
        DataType::Object => Ok(value.clone()),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => cast_to_integer(value, to),
        DataType::Float32 | DataType::Float64 => cast_to_float(value, to),
        DataType::String => cast_to_string(value),
        DataType::Boolean => cast_to_boolean(value),
        DataType::Enum(labels) => cast_to_enum(value, labels),
        _ => Err(unsupported(value)),
    }
}

fn cast_to_integer(value: &Value, to: &DataType) -> Result<Value, String> {
    let wide: i128 = match value {
        Value::Boolean(v) => i128::from(*v),
        Value::Int8(v) => i128::from(*v),
        Value::Int16(v) => i128::from(*v),
        Value::Int32(v) => i128::from(*v),
        Value::Int64(v) => i128::from(*v),
        Value::UInt8(v) => i128::from(*v),
        Value::UInt16(v) => i128::from(*v),
        Value::UInt32(v) => i128::from(*v),
        Value::UInt64(v) => i128::from(*v),
        Value::Float32(v) => float_to_wide(f64::from(*v))?,
        Value::Float64(v) => float_to_wide(*v)?,
        Value::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| format!("'{}' is not an integer", s))?,
        _ => return Err(unsupported(value)),
    };
    narrow_integer(wide, to)
}

fn float_to_wide(v: f64) -> Result<i128, String> {
    if !v.is_finite() {
        return Err(format!("{} is not a finite number", v));
    }
    Ok(v.trunc() as i128)
}

fn narrow_integer(wide: i128, to: &DataType) -> Result<Value, String> {
    let out_of_range = || format!("{} is out of range for {}", wide, to);
    Ok(match to {
        DataType::Int8 => Value::Int8(i8::try_from(wide).map_err(|_| out_of_range())?),
        DataType::Int16 => Value::Int16(i16::try_from(wide).map_err(|_| out_of_range())?),
        DataType::Int32 => Value::Int32(i32::try_from(wide).map_err(|_| out_of_range())?),
        DataType::Int64 => Value::Int64(i64::try_from(wide).map_err(|_| out_of_range())?),
        DataType::UInt8 => Value::UInt8(u8::try_from(wide).map_err(|_| out_of_range())?),
        DataType::UInt16 => Value::UInt16(u16::try_from(wide).map_err(|_| out_of_range())?),
        DataType::UInt32 => Value::UInt32(u32::try_from(wide).map_err(|_| out_of_range())?),
        DataType::UInt64 => Value::UInt64(u64::try_from(wide).map_err(|_| out_of_range())?),
        _ => unreachable!("narrow_integer called with non-integer target"),
    })
}

fn cast_to_float(value: &Value, to: &DataType) -> Result<Value, String> {
    let wide: f64 = match value {
        Value::Boolean(v) => f64::from(u8::from(*v)),
        Value::Int8(v) => f64::from(*v),
        Value::Int16(v) => f64::from(*v),
        Value::Int32(v) => f64::from(*v),
        Value::Int64(v) => *v as f64,
        Value::UInt8(v) => f64::from(*v),
        Value::UInt16(v) => f64::from(*v),
        Value::UInt32(v) => f64::from(*v),
        Value::UInt64(v) => *v as f64,
        Value::Float32(v) => f64::from(*v),
        Value::Float64(v) => *v,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", s))?,
        _ => return Err(unsupported(value)),
    };
    Ok(match to {
        DataType::Float32 => Value::Float32(wide as f32),
        _ => Value::Float64(wide),
    })
}

fn cast_to_string(value: &Value) -> Result<Value, String> {
    match value {
        Value::Boolean(_)
        | Value::Int8(_)
        | Value::Int16(_)
        | Value::Int32(_)
        | Value::Int64(_)
        | Value::UInt8(_)
        | Value::UInt16(_)
        | Value::UInt32(_)
        | Value::UInt64(_)
        | Value::Float32(_)
        | Value::Float64(_)
        | Value::Decimal(_)
        | Value::Date(_)
        | Value::Datetime(_)
        | Value::Time(_) => Ok(Value::String(plain_text(value))),
        _ => Err(unsupported(value)),
    }
}

/// Renders scalars without the quoting `Display` adds for diagnostics.
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cast_to_boolean(value: &Value) -> Result<Value, String> {
    match value {
        Value::Int8(v) => Ok(Value::Boolean(*v != 0)),
        Value::Int16(v) => Ok(Value::Boolean(*v != 0)),
        Value::Int32(v) => Ok(Value::Boolean(*v != 0)),
        Value::Int64(v) => Ok(Value::Boolean(*v != 0)),
        Value::UInt8(v) => Ok(Value::Boolean(*v != 0)),
        Value::UInt16(v) => Ok(Value::Boolean(*v != 0)),
        Value::UInt32(v) => Ok(Value::Boolean(*v != 0)),
        Value::UInt64(v) => Ok(Value::Boolean(*v != 0)),
        Value::String(s) => match s.as_str() {
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            _ => Err(format!("'{}' is not a boolean", s)),
        },
        _ => Err(unsupported(value)),
    }
}

fn cast_to_enum(value: &Value, labels: &[String]) -> Result<Value, String> {
    match value {
        Value::String(s) if labels.iter().any(|l| l == s) => Ok(Value::String(s.clone())),
        Value::String(s) => Err(format!("'{}' is not one of the enum labels", s)),
        _ => Err(unsupported(value)),
    }
}

fn unsupported(value: &Value) -> String {
    format!("unsupported cast from {} value", value.type_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(dtype: DataType, values: Vec<Value>) -> Column {
        Column::new("c", dtype, values).unwrap()
    }

    #[test]
    fn test_int_to_float() {
        let cast = cast_column(
            &column(DataType::Int64, vec![Value::Int64(1), Value::Null]),
            &DataType::Float64,
        )
        .unwrap();
        assert_eq!(cast.dtype(), &DataType::Float64);
        assert_eq!(cast.values(), &[Value::Float64(1.0), Value::Null]);
    }

    #[test]
    fn test_string_parse_to_int() {
        let cast = cast_column(
            &column(
                DataType::String,
                vec![Value::String("42".into()), Value::String(" -7 ".into())],
            ),
            &DataType::Int32,
        )
        .unwrap();
        assert_eq!(cast.values(), &[Value::Int32(42), Value::Int32(-7)]);
    }

    #[test]
    fn test_non_numeric_string_to_int_fails() {
        let err = cast_column(
            &column(DataType::String, vec![Value::String("abc".into())]),
            &DataType::Int64,
        )
        .unwrap_err();
        match err {
            TableError::Cast { column, from, to, .. } => {
                assert_eq!(column, "c");
                assert_eq!(from, DataType::String);
                assert_eq!(to, DataType::Int64);
            }
            other => panic!("expected cast error, got {}", other),
        }
    }

    #[test]
    fn test_integer_narrowing_checked() {
        let err = cast_column(
            &column(DataType::Int64, vec![Value::Int64(300)]),
            &DataType::Int8,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Cast { .. }));

        let ok = cast_column(
            &column(DataType::Int64, vec![Value::Int64(120)]),
            &DataType::Int8,
        )
        .unwrap();
        assert_eq!(ok.values(), &[Value::Int8(120)]);
    }

    #[test]
    fn test_float_to_int_truncates_but_rejects_nan() {
        let ok = cast_column(
            &column(DataType::Float64, vec![Value::Float64(1.9)]),
            &DataType::Int64,
        )
        .unwrap();
        assert_eq!(ok.values(), &[Value::Int64(1)]);

        let err = cast_column(
            &column(DataType::Float64, vec![Value::Float64(f64::NAN)]),
            &DataType::Int64,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_string_to_enum_checks_labels() {
        let target = DataType::Enum(vec!["low".into(), "high".into()]);
        let ok = cast_column(
            &column(DataType::String, vec![Value::String("low".into())]),
            &target,
        )
        .unwrap();
        assert_eq!(ok.dtype(), &target);

        let err = cast_column(
            &column(DataType::String, vec![Value::String("mid".into())]),
            &target,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_identity_cast_is_clone() {
        let source = column(DataType::Int64, vec![Value::Int64(5)]);
        let cast = cast_column(&source, &DataType::Int64).unwrap();
        assert_eq!(cast, source);
    }
}

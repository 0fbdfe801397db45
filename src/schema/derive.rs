//! Type Deriver
//!
//! Converts a single type descriptor into its canonical column data type.
//!
//! Derivation rules:
//! - Optional/union: strip null members; exactly one non-null member type
//!   must remain, and derivation recurses on it
//! - Sequence: all non-ellipsis element types must be equal; derives to a
//!   list of the single element type
//! - Literal enumeration: members must all be strings; derives to an enum
//!   preserving declaration order
//! - Nested record: derives to a struct of the record's schema
//! - Primitives: fixed total mapping; `Object` is the explicit fallback
//!
//! Derivation is referentially transparent: same descriptor, same data
//! type, no side effects, so results are safe to cache per record
//! description.

use crate::descriptor::{LiteralValue, Primitive, SequenceItem, TypeDescriptor};

use super::builder::build_schema;
use super::datatype::{DataType, TimeUnit};
use super::errors::{SchemaError, SchemaResult};

/// Derives the canonical column data type for one descriptor.
pub fn derive_datatype(descriptor: &TypeDescriptor) -> SchemaResult<DataType> {
    match descriptor {
        TypeDescriptor::Primitive(primitive) => Ok(primitive_datatype(*primitive)),
        TypeDescriptor::Optional(inner) => derive_union(std::slice::from_ref(inner.as_ref())),
        TypeDescriptor::Union(members) => derive_union(members),
        TypeDescriptor::Sequence(items) => derive_sequence(items),
        TypeDescriptor::Literal(members) => derive_enum(members),
        TypeDescriptor::Record(record) => Ok(DataType::Struct(build_schema(record)?)),
    }
}

/// Fixed, total primitive mapping.
fn primitive_datatype(primitive: Primitive) -> DataType {
    match primitive {
        Primitive::Int8 => DataType::Int8,
        Primitive::Int16 => DataType::Int16,
        Primitive::Int32 => DataType::Int32,
        Primitive::Int64 => DataType::Int64,
        Primitive::UInt8 => DataType::UInt8,
        Primitive::UInt16 => DataType::UInt16,
        Primitive::UInt32 => DataType::UInt32,
        Primitive::UInt64 => DataType::UInt64,
        Primitive::Float32 => DataType::Float32,
        Primitive::Float64 => DataType::Float64,
        Primitive::String => DataType::String,
        Primitive::Boolean => DataType::Boolean,
        Primitive::Date => DataType::Date,
        Primitive::Datetime => DataType::Datetime(TimeUnit::Microseconds),
        Primitive::Time => DataType::Time,
        Primitive::Duration => DataType::Duration,
        Primitive::Decimal => DataType::Decimal,
        Primitive::Binary => DataType::Binary,
        Primitive::Object => DataType::Object,
        Primitive::Null => DataType::Null,
    }
}

/// Strips null members and derives the single remaining type.
///
/// Repeated identical members collapse before counting, so a union of a
/// type with itself is just that type.
fn derive_union(members: &[TypeDescriptor]) -> SchemaResult<DataType> {
    let mut non_null: Vec<&TypeDescriptor> = Vec::new();
    for member in members {
        if matches!(member, TypeDescriptor::Primitive(Primitive::Null)) {
            continue;
        }
        if !non_null.contains(&member) {
            non_null.push(member);
        }
    }

    match non_null.as_slice() {
        [single] => derive_datatype(single),
        _ => Err(SchemaError::InvalidUnion {
            found: non_null.len(),
        }),
    }
}

/// Derives a sequence descriptor to a list of its single element type.
fn derive_sequence(items: &[SequenceItem]) -> SchemaResult<DataType> {
    let mut element: Option<&TypeDescriptor> = None;
    for item in items {
        let descriptor = match item {
            SequenceItem::Type(descriptor) => descriptor,
            SequenceItem::Ellipsis => continue,
        };
        match element {
            None => element = Some(descriptor),
            Some(first) if first == descriptor => {}
            Some(first) => {
                return Err(SchemaError::InvalidContainer {
                    detail: format!(
                        "element types must be equal ({} vs {})",
                        descriptor_name(first),
                        descriptor_name(descriptor)
                    ),
                })
            }
        }
    }

    let element = element.ok_or_else(|| SchemaError::InvalidContainer {
        detail: "requires at least one element type".to_string(),
    })?;
    Ok(DataType::List(Box::new(derive_datatype(element)?)))
}

/// Derives a closed literal enumeration to an enum of string labels.
fn derive_enum(members: &[LiteralValue]) -> SchemaResult<DataType> {
    if members.is_empty() {
        return Err(SchemaError::InvalidEnum {
            detail: "requires at least one label".to_string(),
        });
    }

    let mut labels: Vec<String> = Vec::with_capacity(members.len());
    for member in members {
        let label = match member {
            LiteralValue::Str(label) => label,
            LiteralValue::Int(v) => {
                return Err(SchemaError::InvalidEnum {
                    detail: format!("members must all be strings (found integer {})", v),
                })
            }
            LiteralValue::Bool(v) => {
                return Err(SchemaError::InvalidEnum {
                    detail: format!("members must all be strings (found boolean {})", v),
                })
            }
        };
        if labels.iter().any(|l| l == label) {
            return Err(SchemaError::InvalidEnum {
                detail: format!("duplicate label '{}'", label),
            });
        }
        labels.push(label.clone());
    }

    Ok(DataType::Enum(labels))
}

/// Returns a short descriptor name for error messages
fn descriptor_name(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Primitive(p) => format!("{:?}", p).to_lowercase(),
        TypeDescriptor::Optional(inner) => format!("optional {}", descriptor_name(inner)),
        TypeDescriptor::Union(_) => "union".to_string(),
        TypeDescriptor::Sequence(_) => "sequence".to_string(),
        TypeDescriptor::Literal(_) => "enumeration".to_string(),
        TypeDescriptor::Record(record) => format!("record '{}'", record.name()),
    }
}

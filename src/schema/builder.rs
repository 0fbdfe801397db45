//! Schema Builder
//!
//! Walks a record description's fields in declaration order, deriving each
//! field's column data type, and produces the ordered schema a real table
//! must match exactly.
//!
//! Building is a pure function of the record description, so the result is
//! cacheable per description (the validator does exactly that).

use crate::descriptor::RecordDescription;

use super::datatype::Schema;
use super::derive::derive_datatype;
use super::errors::{SchemaError, SchemaResult};

/// Builds the ordered column schema for a record description.
///
/// # Errors
///
/// Propagates any derivation failure tagged with the offending field name,
/// and rejects duplicate field names.
pub fn build_schema(record: &RecordDescription) -> SchemaResult<Schema> {
    let mut fields: Vec<(String, _)> = Vec::with_capacity(record.fields().len());

    for field in record.fields() {
        if fields.iter().any(|(name, _)| name == &field.name) {
            return Err(SchemaError::DuplicateField {
                field: field.name.clone(),
            });
        }
        let dtype = derive_datatype(&field.descriptor).map_err(|e| e.in_field(&field.name))?;
        fields.push((field.name.clone(), dtype));
    }

    Ok(Schema::new(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescription, Primitive, TypeDescriptor};
    use crate::schema::DataType;

    fn sample_record() -> RecordDescription {
        RecordDescription::new(
            "readings",
            vec![
                FieldDescription::new("id", TypeDescriptor::Primitive(Primitive::Int64)),
                FieldDescription::new(
                    "note",
                    TypeDescriptor::optional(TypeDescriptor::Primitive(Primitive::String)),
                ),
                FieldDescription::new(
                    "level",
                    TypeDescriptor::string_enum(["low", "high"]),
                ),
            ],
        )
    }

    #[test]
    fn test_schema_preserves_declaration_order() {
        let schema = build_schema(&sample_record()).unwrap();
        assert_eq!(schema.names(), vec!["id", "note", "level"]);
        assert_eq!(schema.get("id"), Some(&DataType::Int64));
        assert_eq!(schema.get("note"), Some(&DataType::String));
        assert_eq!(
            schema.get("level"),
            Some(&DataType::Enum(vec!["low".into(), "high".into()]))
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let record = sample_record();
        assert_eq!(build_schema(&record).unwrap(), build_schema(&record).unwrap());
    }

    #[test]
    fn test_failure_names_offending_field() {
        let record = RecordDescription::new(
            "bad",
            vec![FieldDescription::new(
                "mixed",
                TypeDescriptor::Union(vec![
                    TypeDescriptor::Primitive(Primitive::Int64),
                    TypeDescriptor::Primitive(Primitive::Float64),
                ]),
            )],
        );
        let err = build_schema(&record).unwrap_err();
        assert!(matches!(err, SchemaError::Field { ref field, .. } if field == "mixed"));
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let record = RecordDescription::new(
            "dup",
            vec![
                FieldDescription::new("a", TypeDescriptor::Primitive(Primitive::Int64)),
                FieldDescription::new("a", TypeDescriptor::Primitive(Primitive::String)),
            ],
        );
        assert_eq!(
            build_schema(&record),
            Err(SchemaError::DuplicateField { field: "a".into() })
        );
    }
}

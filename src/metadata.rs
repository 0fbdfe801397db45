//! Field Metadata Extractor
//!
//! Walks a record description's constraint annotations into one metadata
//! row per column. Nullability is derived from the type descriptor (a field
//! is nullable exactly when its descriptor was optional); everything else
//! is copied from the field's annotations, defaulting to "no constraint".
//!
//! Extraction is pure and cacheable alongside the derived schema.

use crate::descriptor::{RecordDescription, SortOrder};
use crate::value::Value;

/// Per-column validation rules.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMetadata {
    /// Column name
    pub name: String,
    /// Whether null cells are permitted
    pub nullable: bool,
    /// Whether the column is part of the composite primary key
    pub primary_key: bool,
    /// Whether cells must be unique within the column
    pub unique: bool,
    /// Required physical sort direction, if any
    pub sorted: Option<SortOrder>,
    /// Whether the column is cast to its declared type before other passes
    pub coerce: bool,
    /// Construction-time default; validation never applies it
    pub default: Option<Value>,
}

/// Extracts one metadata row per column, in declaration order.
pub fn extract_metadata(record: &RecordDescription) -> Vec<FieldMetadata> {
    record
        .fields()
        .iter()
        .map(|field| FieldMetadata {
            name: field.name.clone(),
            nullable: field.descriptor.is_nullable(),
            primary_key: field.constraints.primary_key,
            unique: field.constraints.unique,
            sorted: field.constraints.sorted,
            coerce: field.constraints.coerce,
            default: field.constraints.default.clone(),
        })
        .collect()
}

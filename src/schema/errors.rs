//! Schema derivation error types
//!
//! Derivation-time failures are always fatal to `derive_datatype` /
//! `build_schema` and are surfaced immediately, naming the offending
//! descriptor or field. They are never recovered automatically.

use thiserror::Error;

/// Result type for schema derivation
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Failures of deriving descriptors into canonical column data types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    /// Unions must collapse to exactly one non-null member type
    #[error("unions of multiple non-null types are not supported ({found} non-null members)")]
    InvalidUnion { found: usize },

    /// Sequence element types disagree, or no element type was given
    #[error("invalid sequence: {detail}")]
    InvalidContainer { detail: String },

    /// Enumeration members are not all strings, or labels are missing/repeated
    #[error("invalid enumeration: {detail}")]
    InvalidEnum { detail: String },

    /// No column data type exists and no Object fallback applies
    #[error("cannot derive a column data type for {descriptor}")]
    UnsupportedType { descriptor: String },

    /// A field's descriptor failed to derive; nests for record-in-record paths
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<SchemaError>,
    },

    /// Two fields of one record share a name
    #[error("duplicate field name '{field}'")]
    DuplicateField { field: String },
}

impl SchemaError {
    /// Tag an error with the field it occurred under.
    pub(crate) fn in_field(self, field: &str) -> Self {
        SchemaError::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}

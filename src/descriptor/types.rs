//! Descriptor type definitions
//!
//! Descriptors model the declared shape of a field before derivation:
//! - primitives (fixed-width numerics, string, boolean, temporal, decimal, binary)
//! - optional / union wrappers
//! - homogeneous sequences (including tuple-as-sequence with ellipsis)
//! - closed literal enumerations
//! - nested records

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Requested sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns the direction name for error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Well-known scalar type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Boolean,
    Date,
    /// Derives to microsecond precision
    Datetime,
    Time,
    Duration,
    Decimal,
    Binary,
    /// Deliberate escape hatch for values the system does not model
    Object,
    Null,
}

/// One element position of a sequence descriptor.
///
/// `Ellipsis` stands for "and so on" in tuple-style declarations such as
/// `(int, ...)`; it never contributes an element type of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SequenceItem {
    Type(TypeDescriptor),
    Ellipsis,
}

/// A literal member of a closed enumeration descriptor.
///
/// Only all-string enumerations are derivable; the other variants exist so
/// the deriver can reject them with a precise error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// The declared type of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// A well-known scalar type
    Primitive(Primitive),
    /// Optional-of-T; equivalent to a union of T and null
    Optional(Box<TypeDescriptor>),
    /// General union; only derivable when exactly one non-null member remains
    Union(Vec<TypeDescriptor>),
    /// Homogeneous sequence; all non-ellipsis element types must be equal
    Sequence(Vec<SequenceItem>),
    /// Closed enumeration of literal members
    Literal(Vec<LiteralValue>),
    /// Nested record
    Record(RecordDescription),
}

impl TypeDescriptor {
    /// Optional-of-`inner` convenience constructor.
    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    /// Sequence of a single element type.
    pub fn sequence_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(vec![SequenceItem::Type(element)])
    }

    /// Closed string enumeration from labels, preserving declaration order.
    pub fn string_enum<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeDescriptor::Literal(
            labels
                .into_iter()
                .map(|l| LiteralValue::Str(l.into()))
                .collect(),
        )
    }

    /// Whether values of this descriptor may be null.
    ///
    /// True for `Optional`, for unions containing a null member, and for the
    /// bare null type itself.
    pub fn is_nullable(&self) -> bool {
        match self {
            TypeDescriptor::Optional(_) => true,
            TypeDescriptor::Primitive(Primitive::Null) => true,
            TypeDescriptor::Union(members) => members
                .iter()
                .any(|m| matches!(m, TypeDescriptor::Primitive(Primitive::Null))),
            _ => false,
        }
    }
}

/// Per-field constraint annotations.
///
/// Every flag defaults to "no constraint"; nullability is not here because
/// it is derived from the type descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Field participates in the composite primary key
    pub primary_key: bool,
    /// Field values must be unique within the column
    pub unique: bool,
    /// Field values must be physically sorted in this direction
    pub sorted: Option<SortOrder>,
    /// Cast the column to the declared type before other checks
    pub coerce: bool,
    /// Construction-time default; never applied by validation
    pub default: Option<Value>,
}

/// A single named field of a record description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescription {
    /// Column name
    pub name: String,
    /// Declared type
    pub descriptor: TypeDescriptor,
    /// Constraint annotations
    pub constraints: Constraints,
}

impl FieldDescription {
    /// Create an unconstrained field.
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            constraints: Constraints::default(),
        }
    }

    /// Flag the field as part of the composite primary key.
    pub fn primary_key(mut self) -> Self {
        self.constraints.primary_key = true;
        self
    }

    /// Flag the field as single-column unique.
    pub fn unique(mut self) -> Self {
        self.constraints.unique = true;
        self
    }

    /// Require the column to be physically sorted.
    pub fn sorted(mut self, order: SortOrder) -> Self {
        self.constraints.sorted = Some(order);
        self
    }

    /// Cast the column to the declared type during validation.
    pub fn coerce(mut self) -> Self {
        self.constraints.coerce = true;
        self
    }

    /// Attach a construction-time default value.
    pub fn default_value(mut self, value: Value) -> Self {
        self.constraints.default = Some(value);
        self
    }
}

/// A named, ordered set of field descriptions.
///
/// Immutable once built; authored by the caller at definition time and
/// read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescription {
    name: String,
    fields: Vec<FieldDescription>,
}

impl RecordDescription {
    /// Create a record description from fields in declaration order.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescription>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Logical name of the table shape.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescription] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_default_to_unconstrained() {
        let field = FieldDescription::new("a", TypeDescriptor::Primitive(Primitive::Int64));
        assert!(!field.constraints.primary_key);
        assert!(!field.constraints.unique);
        assert!(field.constraints.sorted.is_none());
        assert!(!field.constraints.coerce);
        assert!(field.constraints.default.is_none());
    }

    #[test]
    fn test_builder_flags() {
        let field = FieldDescription::new("a", TypeDescriptor::Primitive(Primitive::Int64))
            .primary_key()
            .unique()
            .sorted(SortOrder::Descending)
            .coerce();
        assert!(field.constraints.primary_key);
        assert!(field.constraints.unique);
        assert_eq!(field.constraints.sorted, Some(SortOrder::Descending));
        assert!(field.constraints.coerce);
    }

    #[test]
    fn test_optional_is_nullable() {
        let d = TypeDescriptor::optional(TypeDescriptor::Primitive(Primitive::String));
        assert!(d.is_nullable());
        assert!(!TypeDescriptor::Primitive(Primitive::String).is_nullable());
    }

    #[test]
    fn test_union_with_null_member_is_nullable() {
        let d = TypeDescriptor::Union(vec![
            TypeDescriptor::Primitive(Primitive::Int64),
            TypeDescriptor::Primitive(Primitive::Null),
        ]);
        assert!(d.is_nullable());

        let d = TypeDescriptor::Union(vec![
            TypeDescriptor::Primitive(Primitive::Int64),
            TypeDescriptor::Primitive(Primitive::String),
        ]);
        assert!(!d.is_nullable());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let record = RecordDescription::new(
            "events",
            vec![
                FieldDescription::new("b", TypeDescriptor::Primitive(Primitive::Int64)),
                FieldDescription::new("a", TypeDescriptor::Primitive(Primitive::String)),
            ],
        );
        let names: Vec<&str> = record.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}

//! Canonical column data types
//!
//! `DataType` is the engine-level type tag for one column; `Schema` is the
//! ordered column name to data type mapping for a whole table. These are
//! semantic types, not physical layout.

use serde::{Deserialize, Serialize};

/// Precision of a datetime column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Returns the unit abbreviation used in type names
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "us",
            TimeUnit::Nanoseconds => "ns",
        }
    }
}

/// Canonical data type of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
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
    Datetime(TimeUnit),
    Duration,
    Time,
    Decimal,
    Binary,
    Null,
    /// Fallback for types the system does not model
    Object,
    /// Homogeneous list with a single element type
    List(Box<DataType>),
    /// Closed string enumeration, labels in declaration order
    Enum(Vec<String>),
    /// Nested record with its own ordered schema
    Struct(Schema),
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Int8 => write!(f, "int8"),
            DataType::Int16 => write!(f, "int16"),
            DataType::Int32 => write!(f, "int32"),
            DataType::Int64 => write!(f, "int64"),
            DataType::UInt8 => write!(f, "uint8"),
            DataType::UInt16 => write!(f, "uint16"),
            DataType::UInt32 => write!(f, "uint32"),
            DataType::UInt64 => write!(f, "uint64"),
            DataType::Float32 => write!(f, "float32"),
            DataType::Float64 => write!(f, "float64"),
            DataType::String => write!(f, "string"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Date => write!(f, "date"),
            DataType::Datetime(unit) => write!(f, "datetime[{}]", unit.as_str()),
            DataType::Duration => write!(f, "duration"),
            DataType::Time => write!(f, "time"),
            DataType::Decimal => write!(f, "decimal"),
            DataType::Binary => write!(f, "binary"),
            DataType::Null => write!(f, "null"),
            DataType::Object => write!(f, "object"),
            DataType::List(inner) => write!(f, "list[{}]", inner),
            DataType::Enum(labels) => write!(f, "enum[{}]", labels.join(", ")),
            DataType::Struct(schema) => {
                write!(f, "struct[")?;
                for (i, (name, dtype)) in schema.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, dtype)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Ordered mapping from column name to data type.
///
/// Equality is order-sensitive: two schemas with the same columns in a
/// different order are different schemas.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<(String, DataType)>,
}

impl Schema {
    /// Create a schema from (name, type) pairs in column order.
    pub fn new(fields: Vec<(String, DataType)>) -> Self {
        Self { fields }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Data type of a column by name, if present.
    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, dtype)| dtype)
    }

    /// Zero-based position of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }

    /// Column names in schema order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// (name, type) pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, DataType)> {
        self.fields.iter()
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, dtype)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, dtype)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_schema() -> Schema {
        Schema::new(vec![
            ("a".to_string(), DataType::Int64),
            ("b".to_string(), DataType::String),
        ])
    }

    #[test]
    fn test_lookup_by_name() {
        let schema = two_column_schema();
        assert_eq!(schema.get("a"), Some(&DataType::Int64));
        assert_eq!(schema.get("missing"), None);
        assert_eq!(schema.index_of("b"), Some(1));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let forward = two_column_schema();
        let reversed = Schema::new(vec![
            ("b".to_string(), DataType::String),
            ("a".to_string(), DataType::Int64),
        ]);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_display_nested() {
        let dtype = DataType::List(Box::new(DataType::Enum(vec!["x".into(), "y".into()])));
        assert_eq!(dtype.to_string(), "list[enum[x, y]]");
        assert_eq!(
            DataType::Datetime(TimeUnit::Microseconds).to_string(),
            "datetime[us]"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let schema = two_column_schema();
        let json = serde_json::to_string(&schema).unwrap();
        let back: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }
}

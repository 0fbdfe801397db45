//! Validation error types
//!
//! One aggregated failure per pass: each variant names every offending
//! column (or row) its pass found, and failing a pass aborts the remaining
//! passes. The caller may correct the table and retry; nothing is retried
//! automatically.

use thiserror::Error;

use crate::descriptor::SortOrder;
use crate::schema::DataType;
use crate::table::TableError;
use crate::value::Value;

use super::checks::CheckError;

/// Result type for validation
pub type ValidateResult<T> = Result<T, ValidateError>;

/// One discrepancy between the declared and the observed schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDiff {
    /// Declared column absent from the table
    Missing { column: String, expected: DataType },
    /// Table column not present in the declaration
    Unexpected { column: String },
    /// Column present with the wrong type
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
    /// Column present with the right type at the wrong position
    OutOfOrder {
        column: String,
        expected_index: usize,
        actual_index: usize,
    },
}

impl std::fmt::Display for SchemaDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaDiff::Missing { column, expected } => {
                write!(f, "missing column '{}' ({})", column, expected)
            }
            SchemaDiff::Unexpected { column } => write!(f, "unexpected column '{}'", column),
            SchemaDiff::TypeMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "column '{}' has type {}, expected {}",
                column, actual, expected
            ),
            SchemaDiff::OutOfOrder {
                column,
                expected_index,
                actual_index,
            } => write!(
                f,
                "column '{}' at position {}, expected {}",
                column, actual_index, expected_index
            ),
        }
    }
}

fn join_diffs(diffs: &[SchemaDiff]) -> String {
    diffs
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_rows(rows: &[Vec<Value>]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "({})",
                row.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures of the validation passes
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Coercion pass: a column could not be cast to its declared type
    #[error("cannot coerce column '{column}' from {from} to {to}: {reason}")]
    Coercion {
        column: String,
        from: DataType,
        to: DataType,
        reason: String,
    },

    /// Schema pass: observed schema differs from the declared one
    #[error("schema mismatch: {}", join_diffs(.diffs))]
    SchemaMismatch { diffs: Vec<SchemaDiff> },

    /// Nullability pass: non-nullable columns contain nulls
    #[error("null values in non-nullable columns: {}", .columns.join(", "))]
    NullConstraint { columns: Vec<String> },

    /// Uniqueness pass: unique-flagged columns contain repeated values
    #[error("duplicate values in unique columns: {}", .columns.join(", "))]
    Uniqueness { columns: Vec<String> },

    /// Primary key pass: composite key repeats; carries the duplicated rows
    #[error(
        "{} duplicated primary-key rows over ({}): {}",
        .rows.len(),
        .columns.join(", "),
        join_rows(.rows)
    )]
    PrimaryKey {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },

    /// Sortedness pass: a column is not physically sorted as declared
    #[error("column '{column}' is not sorted {order}")]
    SortOrder { column: String, order: SortOrder },

    /// A user-defined check failed; its own error is carried unmodified
    #[error("check '{name}' failed: {source}")]
    Check {
        name: String,
        #[source]
        source: CheckError,
    },

    /// The table collaborator failed outside a coercion cast
    #[error(transparent)]
    Table(#[from] TableError),
}

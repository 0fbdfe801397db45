//! Error Reporter
//!
//! Maps a raised validation failure back to the pass that produced it and
//! the columns it names, for callers that render diagnostics per pass
//! rather than matching error variants.

use super::errors::{SchemaDiff, ValidateError};

/// One ordered validation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Coerce,
    SchemaEquality,
    Nullability,
    Uniqueness,
    PrimaryKey,
    Sortedness,
    CustomChecks,
}

impl Pass {
    /// Returns the pass name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::Coerce => "coerce",
            Pass::SchemaEquality => "schema",
            Pass::Nullability => "nullability",
            Pass::Uniqueness => "uniqueness",
            Pass::PrimaryKey => "primary_key",
            Pass::Sortedness => "sortedness",
            Pass::CustomChecks => "checks",
        }
    }
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated description of everything one pass rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Which pass failed
    pub pass: Pass,
    /// Offending column names, in schema order where applicable
    pub columns: Vec<String>,
    /// Human-readable aggregate message
    pub message: String,
}

impl ValidateError {
    /// The pass this failure belongs to.
    pub fn pass(&self) -> Pass {
        match self {
            ValidateError::Coercion { .. } => Pass::Coerce,
            ValidateError::SchemaMismatch { .. } => Pass::SchemaEquality,
            ValidateError::NullConstraint { .. } => Pass::Nullability,
            ValidateError::Uniqueness { .. } => Pass::Uniqueness,
            ValidateError::PrimaryKey { .. } => Pass::PrimaryKey,
            ValidateError::SortOrder { .. } => Pass::Sortedness,
            ValidateError::Check { .. } => Pass::CustomChecks,
            // Collaborator failures surface under the pass that called it;
            // coercion is the only pass that casts
            ValidateError::Table(_) => Pass::Coerce,
        }
    }

    /// The columns this failure names.
    pub fn columns(&self) -> Vec<String> {
        match self {
            ValidateError::Coercion { column, .. } => vec![column.clone()],
            ValidateError::SchemaMismatch { diffs } => diffs
                .iter()
                .map(|diff| match diff {
                    SchemaDiff::Missing { column, .. }
                    | SchemaDiff::Unexpected { column }
                    | SchemaDiff::TypeMismatch { column, .. }
                    | SchemaDiff::OutOfOrder { column, .. } => column.clone(),
                })
                .collect(),
            ValidateError::NullConstraint { columns }
            | ValidateError::Uniqueness { columns }
            | ValidateError::PrimaryKey { columns, .. } => columns.clone(),
            ValidateError::SortOrder { column, .. } => vec![column.clone()],
            ValidateError::Check { .. } | ValidateError::Table(_) => Vec::new(),
        }
    }

    /// The aggregated per-pass view of this failure.
    pub fn violation(&self) -> Violation {
        Violation {
            pass: self.pass(),
            columns: self.columns(),
            message: self.to_string(),
        }
    }
}

//! Table collaborator interface
//!
//! The validation engine never touches column storage directly; it works
//! through this narrow capability trait. Implementations may vectorize or
//! parallelize internally — that is opaque to the engine. Every operation
//! that changes a table returns a new snapshot; nothing mutates in place,
//! so a failed validation leaves the caller's table untouched.

use thiserror::Error;

use crate::descriptor::SortOrder;
use crate::schema::{DataType, Schema};
use crate::value::Value;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Failures of table collaborator operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// A cell could not be cast to the requested type
    #[error("cannot cast column '{column}' from {from} to {to}: {reason}")]
    Cast {
        column: String,
        from: DataType,
        to: DataType,
        reason: String,
    },

    #[error("column '{column}' has height {height}, expected {expected}")]
    LengthMismatch {
        column: String,
        height: usize,
        expected: usize,
    },

    /// A cell does not inhabit its column's declared type
    #[error("column '{column}' row {row}: {found} value does not inhabit {dtype}")]
    TypeMismatch {
        column: String,
        row: usize,
        found: String,
        dtype: DataType,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("mask has length {mask}, table has height {height}")]
    MaskLengthMismatch { mask: usize, height: usize },

    #[error("row index {index} out of bounds (height {height})")]
    RowOutOfBounds { index: usize, height: usize },
}

/// Capability interface the validation engine requires of a table.
///
/// Whole-column reductions (`is_null_any`, `is_duplicated_any`,
/// `is_sorted`) answer one vectorized question per call; the snapshot
/// operations (`cast`, `with_columns_marked_sorted`, `select`, `filter`)
/// return new tables and leave the receiver untouched.
pub trait Table: Sized {
    /// Observed schema: column names and types in physical order.
    fn schema(&self) -> Schema;

    /// Column names in physical order.
    fn columns(&self) -> Vec<String>;

    /// Row count.
    fn height(&self) -> usize;

    /// Whether any cell of the column is null.
    fn is_null_any(&self, column: &str) -> TableResult<bool>;

    /// Whether any row repeats over the given column set.
    ///
    /// A single column answers plain uniqueness; several columns answer
    /// composite-key uniqueness.
    fn is_duplicated_any(&self, columns: &[&str]) -> TableResult<bool>;

    /// Row mask of rows whose composite key over `columns` occurs more
    /// than once.
    fn duplicated_row_mask(&self, columns: &[&str]) -> TableResult<Vec<bool>>;

    /// Whether the column is physically sorted in the given direction.
    fn is_sorted(&self, column: &str, order: SortOrder) -> TableResult<bool>;

    /// New table with the named columns cast to the target types.
    fn cast(&self, targets: &[(String, DataType)]) -> TableResult<Self>;

    /// New table with the named columns flagged as sorted.
    ///
    /// Metadata only: a performance hint, values are untouched.
    fn with_columns_marked_sorted(&self, columns: &[&str], order: SortOrder) -> TableResult<Self>;

    /// New table holding only the named columns, in the given order.
    fn select(&self, columns: &[&str]) -> TableResult<Self>;

    /// New table holding only the rows where the mask is true.
    fn filter(&self, mask: &[bool]) -> TableResult<Self>;

    /// Cells of one row, in column order. Used for diagnostics only.
    fn row(&self, index: usize) -> TableResult<Vec<Value>>;
}

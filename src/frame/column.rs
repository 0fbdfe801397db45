//! Typed column over cell values
//!
//! A column owns its cells and its declared data type; construction checks
//! every cell against that type, so reductions can assume a well-typed
//! column. The sortedness flag is a hint set by validation, never derived
//! implicitly.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::descriptor::SortOrder;
use crate::schema::DataType;
use crate::table::{TableError, TableResult};
use crate::value::Value;

/// One named, homogeneously typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DataType,
    values: Vec<Value>,
    sorted: Option<SortOrder>,
}

impl Column {
    /// Create a column, checking every cell against the data type.
    ///
    /// # Errors
    ///
    /// Returns `TableError::TypeMismatch` naming the first offending row.
    pub fn new(
        name: impl Into<String>,
        dtype: DataType,
        values: Vec<Value>,
    ) -> TableResult<Self> {
        let name = name.into();
        for (row, value) in values.iter().enumerate() {
            if !value.matches(&dtype) {
                return Err(TableError::TypeMismatch {
                    column: name,
                    row,
                    found: value.type_name().to_string(),
                    dtype,
                });
            }
        }
        Ok(Self {
            name,
            dtype,
            values,
            sorted: None,
        })
    }

    /// Column from values convertible to cells.
    pub fn from_iter<V: Into<Value>>(
        name: impl Into<String>,
        dtype: DataType,
        values: impl IntoIterator<Item = V>,
    ) -> TableResult<Self> {
        Self::new(name, dtype, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> &DataType {
        &self.dtype
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn height(&self) -> usize {
        self.values.len()
    }

    /// The sortedness hint, if validation has set one.
    pub fn sorted_flag(&self) -> Option<SortOrder> {
        self.sorted
    }

    /// Whether any cell is null.
    pub fn has_nulls(&self) -> bool {
        self.values.iter().any(Value::is_null)
    }

    /// Whether any cell value repeats. Nulls count as equal to each other.
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.values.len());
        self.values.iter().any(|value| !seen.insert(value))
    }

    /// Whether cells are physically sorted in the given direction.
    ///
    /// Ties are allowed; nulls order first under ascending and last under
    /// descending, consistent with the cell ordering.
    pub fn is_sorted(&self, order: SortOrder) -> bool {
        self.values.windows(2).all(|pair| {
            let cmp = pair[0].total_cmp(&pair[1]);
            match order {
                SortOrder::Ascending => cmp != Ordering::Greater,
                SortOrder::Descending => cmp != Ordering::Less,
            }
        })
    }

    /// Copy of the column carrying a sortedness hint. Values untouched.
    pub(crate) fn marked_sorted(&self, order: SortOrder) -> Self {
        let mut column = self.clone();
        column.sorted = Some(order);
        column
    }

    /// Copy of the column keeping only masked rows. Drops the sortedness
    /// hint: a subset of a sorted column is still sorted, but callers of
    /// filter are building diagnostics, not proofs.
    pub(crate) fn filtered(&self, mask: &[bool]) -> Self {
        Self {
            name: self.name.clone(),
            dtype: self.dtype.clone(),
            values: self
                .values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| value.clone())
                .collect(),
            sorted: None,
        }
    }

    /// Internal constructor for cast results; cells already verified.
    pub(crate) fn from_cast(name: String, dtype: DataType, values: Vec<Value>) -> Self {
        Self {
            name,
            dtype,
            values,
            sorted: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_column(values: Vec<Value>) -> Column {
        Column::new("a", DataType::Int64, values).unwrap()
    }

    #[test]
    fn test_cell_type_checked_on_construction() {
        let err = Column::new(
            "a",
            DataType::Int64,
            vec![Value::Int64(1), Value::String("x".into())],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::TypeMismatch { row: 1, .. }));
    }

    #[test]
    fn test_null_cells_are_well_typed() {
        let column = int_column(vec![Value::Int64(1), Value::Null]);
        assert!(column.has_nulls());
    }

    #[test]
    fn test_duplicates_detected() {
        assert!(int_column(vec![Value::Int64(1), Value::Int64(1)]).has_duplicates());
        assert!(!int_column(vec![Value::Int64(1), Value::Int64(2)]).has_duplicates());
        // Two nulls repeat
        assert!(int_column(vec![Value::Null, Value::Null]).has_duplicates());
    }

    #[test]
    fn test_sortedness_with_ties() {
        let column = int_column(vec![Value::Int64(1), Value::Int64(1), Value::Int64(3)]);
        assert!(column.is_sorted(SortOrder::Ascending));
        assert!(!column.is_sorted(SortOrder::Descending));
    }

    #[test]
    fn test_marking_sorted_keeps_values() {
        let column = int_column(vec![Value::Int64(1), Value::Int64(2)]);
        let marked = column.marked_sorted(SortOrder::Ascending);
        assert_eq!(marked.values(), column.values());
        assert_eq!(marked.sorted_flag(), Some(SortOrder::Ascending));
        assert_eq!(column.sorted_flag(), None);
    }
}

//! Frame: ordered set of equal-height columns
//!
//! Implements the table collaborator interface. A frame never mutates;
//! every operation that changes anything returns a new snapshot.

use std::collections::HashMap;

use crate::descriptor::SortOrder;
use crate::schema::{DataType, Schema};
use crate::table::{Table, TableError, TableResult};
use crate::value::Value;

use super::cast::cast_column;
use super::column::Column;

/// An in-memory columnar table.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Create a frame, enforcing unique column names and equal heights.
    pub fn new(columns: Vec<Column>) -> TableResult<Self> {
        let expected = columns.first().map(Column::height).unwrap_or(0);
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == column.name()) {
                return Err(TableError::DuplicateColumn(column.name().to_string()));
            }
            if column.height() != expected {
                return Err(TableError::LengthMismatch {
                    column: column.name().to_string(),
                    height: column.height(),
                    expected,
                });
            }
        }
        Ok(Self { columns })
    }

    /// Column by name, if present.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    fn column_required(&self, name: &str) -> TableResult<&Column> {
        self.column(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// One composite key per row over the given columns.
    fn composite_keys<'a>(&'a self, columns: &[&str]) -> TableResult<Vec<Vec<&'a Value>>> {
        let selected: Vec<&Column> = columns
            .iter()
            .map(|name| self.column_required(name))
            .collect::<TableResult<_>>()?;
        Ok((0..self.height())
            .map(|row| selected.iter().map(|c| &c.values()[row]).collect())
            .collect())
    }
}

impl Table for Frame {
    fn schema(&self) -> Schema {
        Schema::new(
            self.columns
                .iter()
                .map(|c| (c.name().to_string(), c.dtype().clone()))
                .collect(),
        )
    }

    fn columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    fn height(&self) -> usize {
        self.columns.first().map(Column::height).unwrap_or(0)
    }

    fn is_null_any(&self, column: &str) -> TableResult<bool> {
        Ok(self.column_required(column)?.has_nulls())
    }

    fn is_duplicated_any(&self, columns: &[&str]) -> TableResult<bool> {
        if let [single] = columns {
            return Ok(self.column_required(single)?.has_duplicates());
        }
        let keys = self.composite_keys(columns)?;
        let mut seen = HashMap::with_capacity(keys.len());
        for key in keys {
            if seen.insert(key, ()).is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn duplicated_row_mask(&self, columns: &[&str]) -> TableResult<Vec<bool>> {
        let keys = self.composite_keys(columns)?;
        let mut counts: HashMap<&Vec<&Value>, usize> = HashMap::with_capacity(keys.len());
        for key in &keys {
            *counts.entry(key).or_insert(0) += 1;
        }
        Ok(keys.iter().map(|key| counts[key] > 1).collect())
    }

    fn is_sorted(&self, column: &str, order: SortOrder) -> TableResult<bool> {
        Ok(self.column_required(column)?.is_sorted(order))
    }

    fn cast(&self, targets: &[(String, DataType)]) -> TableResult<Self> {
        let targets: HashMap<&str, &DataType> = targets
            .iter()
            .map(|(name, dtype)| (name.as_str(), dtype))
            .collect();
        for name in targets.keys() {
            self.column_required(name)?;
        }
        let columns = self
            .columns
            .iter()
            .map(|column| match targets.get(column.name()) {
                Some(dtype) => cast_column(column, dtype),
                None => Ok(column.clone()),
            })
            .collect::<TableResult<_>>()?;
        Ok(Self { columns })
    }

    fn with_columns_marked_sorted(&self, columns: &[&str], order: SortOrder) -> TableResult<Self> {
        for name in columns {
            self.column_required(name)?;
        }
        let columns = self
            .columns
            .iter()
            .map(|column| {
                if columns.contains(&column.name()) {
                    column.marked_sorted(order)
                } else {
                    column.clone()
                }
            })
            .collect();
        Ok(Self { columns })
    }

    fn select(&self, columns: &[&str]) -> TableResult<Self> {
        let columns = columns
            .iter()
            .map(|name| self.column_required(name).cloned())
            .collect::<TableResult<_>>()?;
        Ok(Self { columns })
    }

    fn filter(&self, mask: &[bool]) -> TableResult<Self> {
        if mask.len() != self.height() {
            return Err(TableError::MaskLengthMismatch {
                mask: mask.len(),
                height: self.height(),
            });
        }
        Ok(Self {
            columns: self.columns.iter().map(|c| c.filtered(mask)).collect(),
        })
    }

    fn row(&self, index: usize) -> TableResult<Vec<Value>> {
        if index >= self.height() {
            return Err(TableError::RowOutOfBounds {
                index,
                height: self.height(),
            });
        }
        Ok(self
            .columns
            .iter()
            .map(|c| c.values()[index].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(vec![
            Column::from_iter("x", DataType::Int64, [1i64, 1, 2]).unwrap(),
            Column::from_iter("y", DataType::Int64, [1i64, 1, 1]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_heights_must_match() {
        let err = Frame::new(vec![
            Column::from_iter("x", DataType::Int64, [1i64]).unwrap(),
            Column::from_iter("y", DataType::Int64, [1i64, 2]).unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { .. }));
    }

    #[test]
    fn test_duplicate_column_names_rejected() {
        let err = Frame::new(vec![
            Column::from_iter("x", DataType::Int64, [1i64]).unwrap(),
            Column::from_iter("x", DataType::Int64, [2i64]).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("x".into()));
    }

    #[test]
    fn test_observed_schema_in_physical_order() {
        let schema = frame().schema();
        assert_eq!(schema.names(), vec!["x", "y"]);
        assert_eq!(schema.get("x"), Some(&DataType::Int64));
    }

    #[test]
    fn test_composite_duplicate_detection() {
        let f = frame();
        // (1,1) repeats; x alone also repeats; y alone repeats
        assert!(f.is_duplicated_any(&["x", "y"]).unwrap());
        assert_eq!(
            f.duplicated_row_mask(&["x", "y"]).unwrap(),
            vec![true, true, false]
        );

        let distinct = Frame::new(vec![
            Column::from_iter("x", DataType::Int64, [1i64, 1, 2]).unwrap(),
            Column::from_iter("y", DataType::Int64, [1i64, 2, 1]).unwrap(),
        ])
        .unwrap();
        assert!(!distinct.is_duplicated_any(&["x", "y"]).unwrap());
    }

    #[test]
    fn test_filter_and_select_snapshot() {
        let f = frame();
        let sub = f
            .select(&["x"])
            .unwrap()
            .filter(&[true, false, true])
            .unwrap();
        assert_eq!(sub.columns(), vec!["x"]);
        assert_eq!(sub.height(), 2);
        assert_eq!(sub.row(1).unwrap(), vec![Value::Int64(2)]);
        // Source untouched
        assert_eq!(f.height(), 3);
    }

    #[test]
    fn test_mark_sorted_is_metadata_only() {
        let f = frame();
        let marked = f
            .with_columns_marked_sorted(&["x"], SortOrder::Ascending)
            .unwrap();
        assert_eq!(
            marked.column("x").unwrap().values(),
            f.column("x").unwrap().values()
        );
        assert_eq!(
            marked.column("x").unwrap().sorted_flag(),
            Some(SortOrder::Ascending)
        );
        assert_eq!(marked.column("y").unwrap().sorted_flag(), None);
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let f = frame();
        assert!(matches!(
            f.is_null_any("missing"),
            Err(TableError::ColumnNotFound(_))
        ));
        assert!(f.cast(&[("missing".into(), DataType::Int8)]).is_err());
    }
}

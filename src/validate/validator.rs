//! Validation engine
//!
//! Validates a table against the schema and metadata derived from a record
//! description. Pass order is fixed: coerce, schema equality, nullability,
//! uniqueness, primary key, sortedness, custom checks. The first failing
//! pass raises and no later pass runs.
//!
//! A column flagged both `unique` and `primary_key` goes through the
//! uniqueness pass and the primary-key pass; the redundancy is harmless
//! and deliberate.

use tracing::debug;

use crate::descriptor::{RecordDescription, SortOrder};
use crate::metadata::{extract_metadata, FieldMetadata};
use crate::schema::{build_schema, DataType, Schema, SchemaResult};
use crate::table::{Table, TableError};

use super::checks::Check;
use super::errors::{SchemaDiff, ValidateError, ValidateResult};

/// Validator for one record description.
///
/// Construction derives the schema and metadata once; the validator is the
/// cache. It is cheap to clone and safe to share read-only across
/// concurrent validations of independent tables.
pub struct Validator<T: Table> {
    schema: Schema,
    metadata: Vec<FieldMetadata>,
    checks: Vec<Check<T>>,
}

// Manual impls: no table value is stored, so `T` needs no bounds.
impl<T: Table> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            metadata: self.metadata.clone(),
            checks: self.checks.clone(),
        }
    }
}

impl<T: Table> std::fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("schema", &self.schema)
            .field("metadata", &self.metadata)
            .field("checks", &self.checks)
            .finish()
    }
}

impl<T: Table> Validator<T> {
    /// Derive schema and metadata from a record description.
    ///
    /// # Errors
    ///
    /// Propagates derivation failures (invalid unions, containers,
    /// enumerations, duplicate fields) naming the offending field.
    pub fn new(record: &RecordDescription) -> SchemaResult<Self> {
        Ok(Self {
            schema: build_schema(record)?,
            metadata: extract_metadata(record),
            checks: Vec::new(),
        })
    }

    /// Append a check; checks run last, in the order they were attached.
    pub fn with_check(mut self, check: Check<T>) -> Self {
        self.checks.push(check);
        self
    }

    /// The derived column schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The derived per-column metadata rows.
    pub fn metadata(&self) -> &[FieldMetadata] {
        &self.metadata
    }

    /// Validate a table, returning the (possibly coerced and sort-marked)
    /// snapshot on success.
    ///
    /// # Errors
    ///
    /// Returns the first failing pass's aggregated violation; later passes
    /// do not run.
    pub fn validate(&self, table: T) -> ValidateResult<T> {
        let table = self.coerce_pass(table)?;
        self.schema_pass(&table)?;
        self.nullability_pass(&table)?;
        self.uniqueness_pass(&table)?;
        self.primary_key_pass(&table)?;
        let table = self.sortedness_pass(table)?;
        self.checks_pass(&table)?;
        Ok(table)
    }

    /// Pass 1: cast every coerce-flagged column to its declared type.
    fn coerce_pass(&self, table: T) -> ValidateResult<T> {
        let targets: Vec<(String, DataType)> = self
            .metadata
            .iter()
            .filter(|m| m.coerce)
            .filter_map(|m| {
                self.schema
                    .get(&m.name)
                    .map(|dtype| (m.name.clone(), dtype.clone()))
            })
            .collect();
        if targets.is_empty() {
            return Ok(table);
        }

        let table = table.cast(&targets).map_err(|e| match e {
            TableError::Cast {
                column,
                from,
                to,
                reason,
            } => ValidateError::Coercion {
                column,
                from,
                to,
                reason,
            },
            other => ValidateError::Table(other),
        })?;
        debug!(columns = targets.len(), "coerce pass complete");
        Ok(table)
    }

    /// Pass 2: observed schema must equal the declared schema exactly.
    ///
    /// Always enforced, independent of any per-field flags. Every
    /// discrepancy is reported, not just the first.
    fn schema_pass(&self, table: &T) -> ValidateResult<()> {
        let observed = table.schema();
        if observed == self.schema {
            debug!(columns = self.schema.len(), "schema pass complete");
            return Ok(());
        }

        let mut diffs = Vec::new();
        for (name, expected) in self.schema.iter() {
            match observed.get(name) {
                None => diffs.push(SchemaDiff::Missing {
                    column: name.clone(),
                    expected: expected.clone(),
                }),
                Some(actual) if actual != expected => diffs.push(SchemaDiff::TypeMismatch {
                    column: name.clone(),
                    expected: expected.clone(),
                    actual: actual.clone(),
                }),
                Some(_) => {}
            }
        }
        for (name, _) in observed.iter() {
            if self.schema.get(name).is_none() {
                diffs.push(SchemaDiff::Unexpected {
                    column: name.clone(),
                });
            }
        }
        if diffs.is_empty() {
            // Same names and types, different order
            for (expected_index, (name, _)) in self.schema.iter().enumerate() {
                if let Some(actual_index) = observed.index_of(name) {
                    if actual_index != expected_index {
                        diffs.push(SchemaDiff::OutOfOrder {
                            column: name.clone(),
                            expected_index,
                            actual_index,
                        });
                    }
                }
            }
        }
        Err(ValidateError::SchemaMismatch { diffs })
    }

    /// Pass 3: non-nullable columns must contain no nulls.
    fn nullability_pass(&self, table: &T) -> ValidateResult<()> {
        let mut columns = Vec::new();
        for meta in self.metadata.iter().filter(|m| !m.nullable) {
            if table.is_null_any(&meta.name)? {
                columns.push(meta.name.clone());
            }
        }
        if !columns.is_empty() {
            return Err(ValidateError::NullConstraint { columns });
        }
        debug!("nullability pass complete");
        Ok(())
    }

    /// Pass 4: unique-flagged columns must contain no repeated values.
    fn uniqueness_pass(&self, table: &T) -> ValidateResult<()> {
        let mut columns = Vec::new();
        for meta in self.metadata.iter().filter(|m| m.unique) {
            if table.is_duplicated_any(&[meta.name.as_str()])? {
                columns.push(meta.name.clone());
            }
        }
        if !columns.is_empty() {
            return Err(ValidateError::Uniqueness { columns });
        }
        debug!("uniqueness pass complete");
        Ok(())
    }

    /// Pass 5: the composite key over all primary-key columns must not
    /// repeat. The violation carries the duplicated rows themselves.
    fn primary_key_pass(&self, table: &T) -> ValidateResult<()> {
        let key: Vec<&str> = self
            .metadata
            .iter()
            .filter(|m| m.primary_key)
            .map(|m| m.name.as_str())
            .collect();
        if key.is_empty() {
            return Ok(());
        }

        if table.is_duplicated_any(&key)? {
            let mask = table.duplicated_row_mask(&key)?;
            let duplicates = table.select(&key)?.filter(&mask)?;
            let rows = (0..duplicates.height())
                .map(|i| duplicates.row(i))
                .collect::<Result<Vec<_>, _>>()?;
            return Err(ValidateError::PrimaryKey {
                columns: key.iter().map(|c| c.to_string()).collect(),
                rows,
            });
        }
        debug!(key_columns = key.len(), "primary key pass complete");
        Ok(())
    }

    /// Pass 6: sorted-flagged columns must be physically sorted; columns
    /// that pass are marked sorted in the returned snapshot (a hint for
    /// the collaborator, values untouched).
    fn sortedness_pass(&self, table: T) -> ValidateResult<T> {
        let mut ascending = Vec::new();
        let mut descending = Vec::new();
        for meta in &self.metadata {
            let order = match meta.sorted {
                Some(order) => order,
                None => continue,
            };
            if !table.is_sorted(&meta.name, order)? {
                return Err(ValidateError::SortOrder {
                    column: meta.name.clone(),
                    order,
                });
            }
            match order {
                SortOrder::Ascending => ascending.push(meta.name.as_str()),
                SortOrder::Descending => descending.push(meta.name.as_str()),
            }
        }

        let mut table = table;
        if !ascending.is_empty() {
            table = table.with_columns_marked_sorted(&ascending, SortOrder::Ascending)?;
        }
        if !descending.is_empty() {
            table = table.with_columns_marked_sorted(&descending, SortOrder::Descending)?;
        }
        debug!(
            ascending = ascending.len(),
            descending = descending.len(),
            "sortedness pass complete"
        );
        Ok(table)
    }

    /// Pass 7: user-defined checks, in declaration order. The first check
    /// failure aborts immediately with the check's own error.
    fn checks_pass(&self, table: &T) -> ValidateResult<()> {
        for check in &self.checks {
            check.run(table).map_err(|source| ValidateError::Check {
                name: check.name().to_string(),
                source,
            })?;
        }
        debug!(checks = self.checks.len(), "checks pass complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescription, Primitive, TypeDescriptor};
    use crate::frame::{Column, Frame};

    fn record() -> RecordDescription {
        RecordDescription::new(
            "events",
            vec![
                FieldDescription::new("id", TypeDescriptor::Primitive(Primitive::Int64))
                    .primary_key(),
                FieldDescription::new(
                    "note",
                    TypeDescriptor::optional(TypeDescriptor::Primitive(Primitive::String)),
                ),
            ],
        )
    }

    fn valid_frame() -> Frame {
        Frame::new(vec![
            Column::from_iter("id", DataType::Int64, [1i64, 2]).unwrap(),
            Column::new(
                "note",
                DataType::String,
                vec![crate::value::Value::String("a".into()), crate::value::Value::Null],
            )
            .unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_table_passes() {
        let validator: Validator<Frame> = Validator::new(&record()).unwrap();
        let out = validator.validate(valid_frame()).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn test_schema_and_metadata_cached_on_validator() {
        let validator: Validator<Frame> = Validator::new(&record()).unwrap();
        assert_eq!(validator.schema().names(), vec!["id", "note"]);
        assert!(validator.metadata()[1].nullable);
        assert!(validator.metadata()[0].primary_key);
    }

    #[test]
    fn test_check_runs_after_structural_passes() {
        let validator = Validator::new(&record()).unwrap().with_check(Check::table(
            "id_positive",
            |frame: &Frame| {
                let all_positive = frame
                    .column("id")
                    .and_then(|c| {
                        c.values()
                            .iter()
                            .map(|v| match v {
                                crate::value::Value::Int64(v) => Some(*v >= 0),
                                _ => None,
                            })
                            .collect::<Option<Vec<bool>>>()
                    })
                    .map(|flags| flags.into_iter().all(|b| b))
                    .unwrap_or(false);
                if all_positive {
                    Ok(())
                } else {
                    Err("id contains negative values".into())
                }
            },
        ));
        assert!(validator.validate(valid_frame()).is_ok());

        let negative = Frame::new(vec![
            Column::from_iter("id", DataType::Int64, [-1i64, 2]).unwrap(),
            Column::from_iter("note", DataType::String, ["a", "b"]).unwrap(),
        ])
        .unwrap();
        let err = validator.validate(negative).unwrap_err();
        match err {
            ValidateError::Check { name, source } => {
                assert_eq!(name, "id_positive");
                assert!(source.to_string().contains("negative"));
            }
            other => panic!("expected check failure, got {}", other),
        }
    }

    #[test]
    fn test_violation_reports_pass_and_columns() {
        let err = ValidateError::NullConstraint {
            columns: vec!["a".into(), "b".into()],
        };
        let violation = err.violation();
        assert_eq!(violation.pass, crate::validate::Pass::Nullability);
        assert_eq!(violation.columns, vec!["a", "b"]);
        assert!(violation.message.contains("a, b"));
    }
}

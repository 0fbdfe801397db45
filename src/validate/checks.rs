//! User-defined checks
//!
//! Checks are an explicit, ordered list attached at validator construction
//! time. Each check receives the (possibly coerced) table and either
//! succeeds or signals its own error; the engine propagates that error
//! without reinterpreting it.

use std::sync::Arc;

/// Error type a check may signal. The engine carries it through unmodified.
pub type CheckError = Box<dyn std::error::Error + Send + Sync + 'static>;

type CheckFn<T> = dyn Fn(&T) -> Result<(), CheckError> + Send + Sync;

/// A named pass/fail barrier over the whole table.
///
/// A check may be associated with a column for diagnostics, but it always
/// sees the full table, so cross-column conditions are expressible.
pub struct Check<T> {
    name: String,
    column: Option<String>,
    run: Arc<CheckFn<T>>,
}

impl<T> Check<T> {
    /// Table-level check.
    pub fn table(
        name: impl Into<String>,
        run: impl Fn(&T) -> Result<(), CheckError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            column: None,
            run: Arc::new(run),
        }
    }

    /// Check associated with one column.
    pub fn column(
        column: impl Into<String>,
        name: impl Into<String>,
        run: impl Fn(&T) -> Result<(), CheckError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            column: Some(column.into()),
            run: Arc::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The associated column, if the check is column-scoped.
    pub fn column_name(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Run the check against a table.
    pub fn run(&self, table: &T) -> Result<(), CheckError> {
        (self.run)(table)
    }
}

impl<T> Clone for Check<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            column: self.column.clone(),
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> std::fmt::Debug for Check<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

//! Validation Engine subsystem for framecheck
//!
//! Runs an ordered, fail-fast sequence of passes over a table: coercion,
//! schema equality, nullability, uniqueness, primary key, sortedness, and
//! custom checks.
//!
//! # Design Principles
//!
//! - Fail fast: no later pass runs once an earlier one fails
//! - One aggregated failure per pass, not one per value
//! - Tables are logically immutable; coercion and sort-marking return
//!   new snapshots
//! - Schema and metadata are derived once per record description and
//!   shared read-only across validations

mod checks;
mod errors;
mod report;
mod validator;

pub use checks::{Check, CheckError};
pub use errors::{SchemaDiff, ValidateError, ValidateResult};
pub use report::{Pass, Violation};
pub use validator::Validator;

//! framecheck - schema derivation and validation for columnar frames
//!
//! Declare a table shape once as a [`descriptor::RecordDescription`], derive
//! its canonical column [`schema::Schema`], and validate concrete tables
//! against it: coercion, schema equality, nullability, uniqueness, primary
//! key, sortedness, and user-defined checks, in that order, failing fast
//! with one aggregated violation per pass.
//!
//! The engine talks to tables only through the narrow [`table::Table`]
//! capability trait; [`frame::Frame`] is the bundled in-memory
//! implementation.

pub mod descriptor;
pub mod frame;
pub mod metadata;
pub mod schema;
pub mod table;
pub mod validate;
pub mod value;

//! Schema subsystem for framecheck
//!
//! Turns a record description into the canonical column schema a table must
//! match exactly.
//!
//! # Design Principles
//!
//! - Derivation is pure: same descriptor, same data type, every time
//! - Column order is significant; schema equality is order-sensitive
//! - Unions of multiple non-null types are rejected at derivation time
//! - Unmodeled types fall back to `Object`, never to a silent guess

mod builder;
mod datatype;
mod derive;
mod errors;

pub use builder::build_schema;
pub use datatype::{DataType, Schema, TimeUnit};
pub use derive::derive_datatype;
pub use errors::{SchemaError, SchemaResult};

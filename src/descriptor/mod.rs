//! Record Description subsystem for framecheck
//!
//! A record description is the static, caller-authored declaration of a
//! table shape: ordered field names, type descriptors, and per-field
//! constraint annotations.
//!
//! # Design Principles
//!
//! - Immutable once defined: one description per logical table shape
//! - Declaration order is significant and preserved everywhere
//! - Constraints default to "no constraint" when absent
//! - Nullability is a property of the type descriptor, not an annotation

mod types;

pub use types::{
    Constraints, FieldDescription, LiteralValue, Primitive, RecordDescription, SequenceItem,
    SortOrder, TypeDescriptor,
};

//! In-memory columnar frame
//!
//! The reference implementation of the table collaborator interface: an
//! ordered set of named, homogeneously typed columns of equal height.
//!
//! # Design Principles
//!
//! - Columns are typed at construction; every cell is checked against the
//!   column's data type
//! - Frames are logically immutable: cast, select, filter, and sort-marking
//!   return new snapshots
//! - The sortedness flag is metadata only and never changes cell values

mod cast;
mod column;
mod frame;

pub use column::Column;
pub use frame::Frame;

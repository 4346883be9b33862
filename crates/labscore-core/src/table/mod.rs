//! Per-group score tables.
//!
//! A group is a directory of student log files. Each file becomes one
//! `StudentRow`; the rows together form a `GroupTable` whose columns are the
//! union of the labs seen in the group.

mod group;
mod student;

pub use group::*;
pub use student::*;

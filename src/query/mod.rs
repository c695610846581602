//! Query evaluation module
//!
//! This module contains the chainable sequence operators, grouping and the
//! join operators.

pub mod group;
pub mod join;
pub mod sequence;

pub use group::{GroupMap, Grouped};
pub use sequence::{Query, SortOrder};

//! empdept - declarative in-memory queries over the EMP / DEPT / SALGRADE schema
//!
//! This library provides:
//! - A catalog of employees, departments and salary grades
//! - A query layer (filter, project, sort, group, join, aggregate)
//! - The canned reports and their text rendering

pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod report;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use query::Query;

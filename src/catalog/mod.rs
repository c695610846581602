//! Catalog module
//!
//! This module contains the record definitions and the data sources that
//! supply them.

pub mod catalog;
pub mod schema;

pub use catalog::{Catalog, DataSource, JsonFile, SampleData};
pub use schema::{Department, Employee, SalaryGrade};

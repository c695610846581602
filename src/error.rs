//! Error types for empdept
//!
//! This module defines all error types used by the catalog, the query
//! operators and the canned reports.

use thiserror::Error;

/// The main error type for empdept
#[derive(Error, Debug)]
pub enum Error {
    // ========== Aggregate Errors ==========
    #[error("Aggregate error: {0} over an empty sequence")]
    EmptyAggregate(&'static str),

    #[error("Aggregate error: key {0} not found")]
    KeyNotFound(String),

    // ========== Catalog Errors ==========
    #[error("Catalog error: primary key violation - {0}")]
    PrimaryKeyViolation(String),

    #[error("Catalog error: foreign key violation - {0}")]
    ForeignKeyViolation(String),

    #[error("Catalog error: constraint violation - {0}")]
    ConstraintViolation(String),

    // ========== Report Errors ==========
    #[error("Report error: unknown report '{0}'")]
    UnknownReport(String),

    #[error("Report error: unknown output format '{0}'")]
    UnknownFormat(String),

    // ========== Serialization Errors ==========
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for empdept operations
pub type Result<T> = std::result::Result<T, Error>;

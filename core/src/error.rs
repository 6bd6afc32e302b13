//! Core error types for the report card service

use thiserror::Error;

/// Core error type for all operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Report already exists: {0}")]
    ReportExists(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CoreError {
    /// Map an insert failure, turning unique violations on the primary key
    /// into `ReportExists`.
    pub fn from_insert(err: sqlx::Error, post_id: &str) -> Self {
        const UNIQUE_VIOLATION: &str = "23505";

        let is_duplicate = err
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == UNIQUE_VIOLATION);

        if is_duplicate {
            CoreError::ReportExists(post_id.to_string())
        } else {
            CoreError::Database(err)
        }
    }
}

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

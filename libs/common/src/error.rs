//! Custom error types for the common library
//!
//! This module defines the database error taxonomy shared by every service
//! that talks to the users database.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The database was unreachable or rejected the credentials
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Opening a connection took longer than the configured connect timeout
    #[error("Database connection timed out after {0}s")]
    Timeout(u64),

    /// Error occurred during statement execution or commit
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

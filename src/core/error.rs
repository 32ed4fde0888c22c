/// Adapter Error Module
///
/// This module defines the error types for the SQLite adapter and its
/// samples. Every backend failure is carried with its original diagnostic
/// so callers can inspect the underlying `rusqlite::Error`.
use thiserror::Error;

/// Error type for all adapter operations.
///
/// This enum covers:
/// - Opening and closing the backing store
/// - Access to the process-wide instance outside its lifetime
/// - Parameter kinds without a backend mapping
/// - Statement preparation and execution failures
/// - Transaction control misuse
/// - Configuration and file system failures
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The backing store could not be opened or closed
    #[error("Connection error: {0}")]
    Connection(#[source] rusqlite::Error),

    /// An operation was invoked with no live process-wide instance
    #[error("Database is not open; call connect() before using it")]
    Uninitialized,

    /// A bound parameter's value kind has no backend mapping
    #[error("Unsupported parameter type: {0}")]
    UnsupportedType(String),

    /// The backend rejected or failed a prepared/executed statement
    #[error("Query execution failed for `{sql}`: {source}")]
    QueryExecution {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Explicit transaction control invoked while implicit mode is active
    #[error("Implicit transaction mode is active")]
    InvalidMode,

    /// Transaction lifecycle misuse (double begin, commit with none active)
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdapterError {
    /// Wraps a backend error raised while running `sql`.
    pub fn query(sql: &str, source: rusqlite::Error) -> Self {
        AdapterError::QueryExecution {
            sql: sql.to_string(),
            source,
        }
    }
}

/// Type alias for Result to use AdapterError as the error type.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        assert_snapshot!(
            AdapterError::Uninitialized.to_string(),
            @"Database is not open; call connect() before using it"
        );
        assert_snapshot!(
            AdapterError::InvalidMode.to_string(),
            @"Implicit transaction mode is active"
        );
        assert_snapshot!(
            AdapterError::UnsupportedType("array".to_string()).to_string(),
            @"Unsupported parameter type: array"
        );

        let conn_err = AdapterError::Connection(rusqlite::Error::InvalidQuery);
        assert!(conn_err.to_string().starts_with("Connection error"));
    }

    #[test]
    fn test_query_error_keeps_source() {
        let err = AdapterError::query("SELECT 1", rusqlite::Error::ExecuteReturnedResults);
        assert!(err.to_string().contains("`SELECT 1`"));

        let source = err.source().expect("query errors carry their cause");
        assert!(source.downcast_ref::<rusqlite::Error>().is_some());
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let adapter_err: AdapterError = io_err.into();
        match adapter_err {
            AdapterError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }
    }
}

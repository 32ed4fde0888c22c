/// Core Module
///
/// This module contains the database accessor and its error type. The
/// samples and binaries are built on top of it.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{AdapterError, Result};

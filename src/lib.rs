// Core infrastructure modules
pub mod core;

// Configuration and the sample programs built on the adapter
pub mod config;
pub mod sample;

pub use crate::core::db::{global, ParamValue, QueryResult, SqliteAdapter, TransactionState};
pub use crate::core::{AdapterError, Result};

/// Installs the `tracing` subscriber used by the sample binaries.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Process-wide Adapter
///
/// A single [`SqliteAdapter`] can be installed for the whole process with
/// [`connect`] and removed with [`disconnect`]. Between the two calls,
/// [`with_adapter`] lends it out; outside that window every access fails
/// with `AdapterError::Uninitialized`.
///
/// New code should prefer owning a `SqliteAdapter` directly.

use super::connection::SqliteAdapter;
use crate::core::{AdapterError, Result};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

static INSTANCE: OnceCell<Mutex<Option<SqliteAdapter>>> = OnceCell::new();

fn slot() -> MutexGuard<'static, Option<SqliteAdapter>> {
    INSTANCE
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Opens the database at `path` and installs it as the process-wide adapter.
///
/// A previously installed adapter is closed first.
pub fn connect<P: AsRef<Path>>(path: P) -> Result<()> {
    let adapter = SqliteAdapter::open(path)?;
    let previous = slot().replace(adapter);
    if let Some(previous) = previous {
        debug!("replacing process-wide adapter");
        previous.close()?;
    }
    Ok(())
}

/// Closes and removes the process-wide adapter.
pub fn disconnect() -> Result<()> {
    let adapter = slot().take().ok_or(AdapterError::Uninitialized)?;
    adapter.close()
}

/// Runs `f` against the process-wide adapter.
///
/// # Errors
///
/// Returns `AdapterError::Uninitialized` if no adapter is installed; `f` is
/// not called in that case.
///
/// # Examples
///
/// ```
/// use sqlite_adapter::core::db::global;
/// global::connect(":memory:")?;
/// let rows = global::with_adapter(|db| db.execute_query("SELECT 1", &[]))?;
/// assert_eq!(rows, vec![vec!["1".to_string()]]);
/// global::disconnect()?;
/// # Ok::<(), sqlite_adapter::AdapterError>(())
/// ```
pub fn with_adapter<T, F>(f: F) -> Result<T>
where
    F: FnOnce(&mut SqliteAdapter) -> Result<T>,
{
    let mut guard = slot();
    let adapter = guard.as_mut().ok_or(AdapterError::Uninitialized)?;
    f(adapter)
}

/// Whether a process-wide adapter is installed.
pub fn is_connected() -> bool {
    slot().is_some()
}

/// Connection Management Module
///
/// This module provides [`SqliteAdapter`], a session object that owns one
/// SQLite connection and drives the transaction lifecycle around it.

use super::params::ParamValue;
use super::query::{QueryExecutor, QueryResult};
use super::schema;
use crate::config::DatabaseConfig;
use crate::core::{AdapterError, Result};
use rusqlite::Connection;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Represents database transaction states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    /// No active transaction (autocommit mode)
    #[default]
    None,
    /// Transaction in progress
    Active,
}

/// Owns a single SQLite connection.
///
/// With implicit transactions enabled (the default) every
/// [`execute_non_query`](Self::execute_non_query) runs inside its own
/// transaction, committed on success and rolled back on failure. With
/// implicit transactions disabled the caller drives
/// [`begin_transaction`](Self::begin_transaction),
/// [`commit_transaction`](Self::commit_transaction) and
/// [`rollback_transaction`](Self::rollback_transaction).
#[derive(Debug)]
pub struct SqliteAdapter {
    conn: Connection,
    path: Option<PathBuf>,
    auto_transaction: bool,
}

impl SqliteAdapter {
    /// Opens (or creates) the SQLite database at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file, or ":memory:" for an in-memory database
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Connection` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(AdapterError::Connection)?;
        info!(path = %path.display(), "opened database");

        Ok(SqliteAdapter {
            conn,
            path: (path != Path::new(":memory:")).then(|| path.to_path_buf()),
            auto_transaction: true,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(AdapterError::Connection)?;
        debug!("opened in-memory database");

        Ok(SqliteAdapter {
            conn,
            path: None,
            auto_transaction: true,
        })
    }

    /// Opens the database described by `config` and applies its settings.
    pub fn open_with_config(config: &DatabaseConfig) -> Result<Self> {
        let mut adapter = Self::open(&config.path)?;
        adapter.auto_transaction = config.auto_transaction;

        if let Some(ms) = config.busy_timeout_ms {
            adapter
                .conn
                .busy_timeout(Duration::from_millis(ms))
                .map_err(AdapterError::Connection)?;
        }
        if let Some(enabled) = config.foreign_keys {
            adapter
                .conn
                .pragma_update(None, "foreign_keys", enabled)
                .map_err(AdapterError::Connection)?;
        }
        if let Some(capacity) = config.statement_cache_capacity {
            adapter.conn.set_prepared_statement_cache_capacity(capacity);
        }

        Ok(adapter)
    }

    /// Creates a new, empty database file at `path`.
    ///
    /// An existing file at `path` is truncated. SQLite initializes the file
    /// on first open.
    pub fn create_database<P: AsRef<Path>>(path: P) -> Result<()> {
        File::create(path.as_ref())?;
        info!(path = %path.as_ref().display(), "created database file");
        Ok(())
    }

    /// Path of the backing file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn auto_transaction(&self) -> bool {
        self.auto_transaction
    }

    /// Enables or disables implicit transactions.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Transaction` when enabling implicit mode while
    /// an explicit transaction is still open.
    pub fn set_auto_transaction(&mut self, enabled: bool) -> Result<()> {
        if enabled && self.transaction_state() == TransactionState::Active {
            return Err(AdapterError::Transaction(
                "Cannot enable implicit transactions while a transaction is active".to_string(),
            ));
        }
        self.auto_transaction = enabled;
        Ok(())
    }

    /// Current transaction state, as reported by the connection itself.
    pub fn transaction_state(&self) -> TransactionState {
        if self.conn.is_autocommit() {
            TransactionState::None
        } else {
            TransactionState::Active
        }
    }

    /// Executes SQL for its side effects (INSERT, UPDATE, DELETE, DDL).
    ///
    /// Without parameters `sql` may contain several statements; with
    /// parameters it must contain exactly one. Rows a statement produces are
    /// discarded. In implicit mode all of it runs in one transaction; on
    /// failure the transaction is rolled back and the store is left as it was.
    ///
    /// # Returns
    ///
    /// The number of rows changed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sqlite_adapter::{params, SqliteAdapter};
    /// let db = SqliteAdapter::open_in_memory()?;
    /// db.execute_non_query("CREATE TABLE t (a, b)", &[])?;
    /// db.execute_non_query("INSERT INTO t VALUES (?, ?)", &params![1, "x"])?;
    /// # Ok::<(), sqlite_adapter::AdapterError>(())
    /// ```
    pub fn execute_non_query(&self, sql: &str, params: &[ParamValue]) -> Result<usize> {
        if !self.auto_transaction {
            return QueryExecutor::new(&self.conn).execute(sql, params);
        }

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| AdapterError::query("BEGIN", e))?;

        match QueryExecutor::new(&tx).execute(sql, params) {
            Ok(changed) => {
                tx.commit().map_err(|e| AdapterError::query("COMMIT", e))?;
                Ok(changed)
            }
            Err(e) => {
                warn!(error = %e, "statement failed, rolling back");
                if let Err(rollback_err) = tx.rollback() {
                    error!(error = %rollback_err, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Executes an INSERT and returns the rowid it generated.
    ///
    /// The insert is committed before the id is read back, so the two steps
    /// are not atomic: if reading the id fails the row is still stored.
    pub fn execute_insert(&self, sql: &str, params: &[ParamValue]) -> Result<i64> {
        self.execute_non_query(sql, params)?;
        QueryExecutor::new(&self.conn).last_insert_id()
    }

    /// Executes a SELECT and returns every row with each cell as text.
    pub fn execute_query(&self, sql: &str, params: &[ParamValue]) -> Result<Vec<Vec<String>>> {
        Ok(self.query_with_columns(sql, params)?.rows)
    }

    /// Executes a SELECT and returns rows together with their column names.
    pub fn query_with_columns(&self, sql: &str, params: &[ParamValue]) -> Result<QueryResult> {
        QueryExecutor::new(&self.conn).query(sql, params)
    }

    /// Returns the column names of `table`, even when it holds no rows.
    pub fn column_names(&self, table: &str) -> Result<Vec<String>> {
        schema::column_names(&self.conn, table)
    }

    /// Starts an explicit transaction.
    ///
    /// # Errors
    ///
    /// * `AdapterError::InvalidMode` if implicit transactions are enabled
    /// * `AdapterError::Transaction` if a transaction is already active
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.ensure_explicit_mode()?;
        if self.transaction_state() == TransactionState::Active {
            return Err(AdapterError::Transaction(
                "Transaction already in progress".to_string(),
            ));
        }
        self.run_control("BEGIN")
    }

    /// Commits the active explicit transaction.
    pub fn commit_transaction(&mut self) -> Result<()> {
        self.ensure_explicit_mode()?;
        self.ensure_active()?;
        self.run_control("COMMIT")
    }

    /// Rolls back the active explicit transaction.
    pub fn rollback_transaction(&mut self) -> Result<()> {
        self.ensure_explicit_mode()?;
        self.ensure_active()?;
        self.run_control("ROLLBACK")
    }

    /// Closes the connection, rolling back any open transaction first.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Connection` if SQLite refuses to close.
    pub fn close(self) -> Result<()> {
        if self.transaction_state() == TransactionState::Active {
            warn!("closing with an open transaction, rolling back");
            self.conn
                .execute_batch("ROLLBACK")
                .map_err(|e| AdapterError::query("ROLLBACK", e))?;
        }
        self.conn.flush_prepared_statement_cache();
        self.conn.close().map_err(|(_, e)| AdapterError::Connection(e))?;
        debug!("database closed");
        Ok(())
    }

    fn ensure_explicit_mode(&self) -> Result<()> {
        if self.auto_transaction {
            return Err(AdapterError::InvalidMode);
        }
        Ok(())
    }

    fn ensure_active(&self) -> Result<()> {
        if self.transaction_state() != TransactionState::Active {
            return Err(AdapterError::Transaction(
                "No transaction in progress".to_string(),
            ));
        }
        Ok(())
    }

    fn run_control(&self, sql: &str) -> Result<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| AdapterError::query(sql, e))?;
        debug!(command = sql, "transaction control");
        Ok(())
    }
}

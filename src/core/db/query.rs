/// Query Execution Module
///
/// This module runs parameterized statements against a connection and
/// materializes their results. Every row is read and converted to text
/// before a result is returned, so no cursor outlives the call.

use super::params::ParamValue;
use crate::core::{AdapterError, Result};
use rusqlite::{params_from_iter, types::ValueRef, Batch, Connection, Statement};
use tracing::debug;

/// Represents the fully materialized result of a query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names as reported by the statement metadata
    pub columns: Vec<String>,
    /// Rows of data as string values, in the order the backend produced them
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        QueryResult { columns, rows }
    }

    /// Number of rows returned
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Statement execution service that operates on a database connection.
///
/// Statements go through the connection's prepared-statement cache, which
/// plays the role of a reusable command handle: the SQL is looked up (or
/// prepared) and the supplied parameters are bound by position before each
/// run. The cache resets and clears a statement's bindings when it is
/// returned, so no value leaks from one call into the next.
pub struct QueryExecutor<'a> {
    connection: &'a Connection,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new QueryExecutor for the given connection
    pub fn new(connection: &'a Connection) -> Self {
        QueryExecutor { connection }
    }

    /// Executes SQL text for its side effects (INSERT, UPDATE, DELETE, DDL).
    ///
    /// Without parameters `sql` may hold several `;`-separated statements;
    /// each one runs in order. With parameters it must hold exactly one.
    /// Rows produced along the way (`RETURNING`, `PRAGMA`, `SELECT`) are
    /// read and discarded so the statement always runs to completion.
    ///
    /// # Returns
    ///
    /// The number of rows changed, inserted or deleted across all statements.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::QueryExecution` if a statement cannot be
    /// prepared, the parameter count does not match, parameters are given
    /// for multi-statement text, or execution fails.
    pub fn execute(&self, sql: &str, params: &[ParamValue]) -> Result<usize> {
        let kinds: Vec<&str> = params.iter().map(ParamValue::kind).collect();
        debug!(sql, ?kinds, "executing statement");

        let before = self.total_changes()?;
        let mut batch = Batch::new(self.connection, sql);

        if params.is_empty() {
            while let Some(mut stmt) = batch.next().map_err(|e| AdapterError::query(sql, e))? {
                drain(&mut stmt, &[]).map_err(|e| AdapterError::query(sql, e))?;
            }
        } else {
            let mut stmt = batch
                .next()
                .map_err(|e| AdapterError::query(sql, e))?
                .ok_or_else(|| {
                    AdapterError::query(sql, rusqlite::Error::InvalidParameterCount(params.len(), 0))
                })?;
            // Any further statement, even one that fails to prepare, is rejected
            // before the first one runs.
            if !matches!(batch.next(), Ok(None)) {
                return Err(AdapterError::query(sql, rusqlite::Error::MultipleStatement));
            }
            drain(&mut stmt, params).map_err(|e| AdapterError::query(sql, e))?;
        }

        let after = self.total_changes()?;
        Ok(usize::try_from(after - before).unwrap_or(usize::MAX))
    }

    fn total_changes(&self) -> Result<i64> {
        const SQL: &str = "SELECT total_changes()";
        self.connection
            .prepare_cached(SQL)
            .and_then(|mut stmt| stmt.query_row([], |row| row.get(0)))
            .map_err(|e| AdapterError::query(SQL, e))
    }

    /// Executes a query and returns every row converted to text.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::QueryExecution` on any backend failure. A
    /// failure while reading rows discards the rows already read.
    pub fn query(&self, sql: &str, params: &[ParamValue]) -> Result<QueryResult> {
        debug!(sql, params = params.len(), "running query");
        let mut stmt = self
            .connection
            .prepare_cached(sql)
            .map_err(|e| AdapterError::query(sql, e))?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = columns.len();

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..column_count)
                    .map(|i| row.get_ref(i).map(format_value))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(|e| AdapterError::query(sql, e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| AdapterError::query(sql, e))?;

        Ok(QueryResult::new(columns, rows))
    }

    /// Reads the last rowid inserted on this connection.
    pub fn last_insert_id(&self) -> Result<i64> {
        const SQL: &str = "SELECT last_insert_rowid()";
        let result = self.query(SQL, &[])?;
        let cell = result
            .rows
            .first()
            .and_then(|row| row.first())
            .ok_or_else(|| AdapterError::query(SQL, rusqlite::Error::QueryReturnedNoRows))?;
        cell.parse::<i64>().map_err(|e| {
            AdapterError::query(
                SQL,
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                ),
            )
        })
    }
}

/// Binds `params` and steps `stmt` until it is done, discarding any rows.
fn drain(stmt: &mut Statement<'_>, params: &[ParamValue]) -> rusqlite::Result<()> {
    let mut rows = stmt.query(params_from_iter(params.iter()))?;
    while rows.next()?.is_some() {}
    Ok(())
}

/// Formats a SQLite value as a result cell.
///
/// `NULL` becomes the empty string and blobs are rendered as lowercase hex.
fn format_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => format_real(f),
        ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
        ValueRef::Blob(b) => b.iter().map(|byte| format!("{:02x}", byte)).collect(),
    }
}

/// Shortest round-trip form of `f`, switching to `1E+20` / `1E-05` style
/// notation when the decimal exponent is at least 15 or below -4.
fn format_real(f: f64) -> String {
    if !f.is_finite() || f == 0.0 {
        return f.to_string();
    }
    let scientific = format!("{:e}", f);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return f.to_string(),
    };
    if (-4..15).contains(&exponent) {
        f.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", mantissa, sign, exponent.abs())
    }
}

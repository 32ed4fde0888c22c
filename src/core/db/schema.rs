/// Schema Introspection Module
///
/// Reads table metadata without scanning table contents.

use crate::core::{AdapterError, Result};
use rusqlite::Connection;

/// Quotes an identifier for safe interpolation into SQL text.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Returns the column names of `table` in declaration order.
///
/// A `LIMIT 0` statement is prepared so the names come from the statement
/// metadata alone; no rows are read, and empty tables still report their
/// columns.
///
/// # Errors
///
/// Returns `AdapterError::QueryExecution` if the table does not exist.
pub fn column_names(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let sql = format!("SELECT * FROM {} LIMIT 0", quote_identifier(table));
    let stmt = conn
        .prepare(&sql)
        .map_err(|e| AdapterError::query(&sql, e))?;

    Ok(stmt.column_names().into_iter().map(String::from).collect())
}

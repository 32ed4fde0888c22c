//! Sample programs built on [`SqliteAdapter`].
//!
//! `run_button_click` is the body of the desktop sample's button handler:
//! it logs every row it reads. `run_console_sample` is the console sample,
//! which returns its lines for the caller to print.

use crate::config::Config;
use crate::core::db::{ParamValue, SqliteAdapter};
use crate::core::Result;
use std::path::Path;
use tracing::{debug, error, warn};

const CREATE_FOO_SQL: &str = "CREATE TABLE FOO (ID INTEGER PRIMARY KEY, MyValue NVARCHAR(256))";
const INSERT_FOO_SQL: &str = "INSERT INTO FOO (MyValue) VALUES (?)";
const SELECT_FOO_SQL: &str = "SELECT * FROM FOO";

const CREATE_TEST_SQL: &str =
    "CREATE TABLE Test (id integer primary key AUTOINCREMENT, text varchar(100))";
const INSERT_TEST_SQL: &str = "INSERT INTO Test (text) VALUES (?)";
const SELECT_TEST_SQL: &str = "SELECT * FROM Test";

/// Runs the button-click sample against `config.database`.
///
/// Returns `Ok(None)` without touching the database unless
/// `config.sample.debug_flag` is 1. Otherwise inserts each configured value
/// into `FOO` and returns the full contents of the table.
pub fn run_button_click(config: &Config) -> Result<Option<Vec<Vec<String>>>> {
    debug!("button1 clicked");
    if config.sample.debug_flag != 1 {
        return Ok(None);
    }

    click(config).map(Some).map_err(|e| {
        error!(error = %e, "button sample failed");
        e
    })
}

fn click(config: &Config) -> Result<Vec<Vec<String>>> {
    let values = config
        .sample
        .insert_values
        .iter()
        .cloned()
        .map(ParamValue::try_from)
        .collect::<Result<Vec<_>>>()?;

    let db = SqliteAdapter::open_with_config(&config.database)?;

    // A second click finds the table in place; that is expected here.
    if let Err(e) = db.execute_non_query(CREATE_FOO_SQL, &[]) {
        warn!(error = %e, "table FOO already exists");
    }

    for value in values {
        db.execute_non_query(INSERT_FOO_SQL, &[value])?;
    }

    let rows = db.execute_query(SELECT_FOO_SQL, &[])?;
    for row in &rows {
        debug!("{}", format_foo_row(row));
    }

    db.close()?;
    Ok(rows)
}

fn format_foo_row(row: &[String]) -> String {
    format!(
        "ID = {}, MyValue = {}",
        row.first().map(String::as_str).unwrap_or_default(),
        row.get(1).map(String::as_str).unwrap_or_default()
    )
}

/// Runs the console sample: creates `Test`, inserts `count` rows and reads
/// them back.
///
/// Returns one `ID = {id}, Name = {text}` line per row. Fails if `Test`
/// already exists in the database at `path`.
pub fn run_console_sample<P: AsRef<Path>>(path: P, count: usize) -> Result<Vec<String>> {
    let db = SqliteAdapter::open(path)?;

    db.execute_non_query(CREATE_TEST_SQL, &[])?;
    for i in 0..count {
        db.execute_non_query(INSERT_TEST_SQL, &[format!("this is {} text", i).into()])?;
    }

    let lines = db
        .execute_query(SELECT_TEST_SQL, &[])?
        .iter()
        .map(|row| format!("ID = {}, Name = {}", row[0], row[1]))
        .collect();

    db.close()?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, SampleConfig};
    use crate::core::AdapterError;

    fn config_in(dir: &Path) -> Config {
        Config {
            database: DatabaseConfig {
                path: dir.join("Test.db"),
                ..DatabaseConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_button_click_inserts_hello_world() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let rows = run_button_click(&config).unwrap().unwrap();
        assert_eq!(rows, vec![vec!["1", "Hello World"]]);
    }

    #[test]
    fn test_second_click_tolerates_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        run_button_click(&config).unwrap();
        let rows = run_button_click(&config).unwrap().unwrap();
        assert_eq!(rows, vec![vec!["1", "Hello World"], vec!["2", "Hello World"]]);
    }

    #[test]
    fn test_button_click_disabled_by_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.sample.debug_flag = 0;

        assert_eq!(run_button_click(&config).unwrap(), None);
        assert!(!config.database.path.exists());
    }

    #[test]
    fn test_button_click_rejects_unsupported_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.sample = SampleConfig {
            insert_values: vec![toml::Value::Array(vec![])],
            ..SampleConfig::default()
        };

        assert!(matches!(
            run_button_click(&config),
            Err(AdapterError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_console_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testdb.db");

        let lines = run_console_sample(&path, 3).unwrap();
        assert_eq!(
            lines,
            vec![
                "ID = 1, Name = this is 0 text",
                "ID = 2, Name = this is 1 text",
                "ID = 3, Name = this is 2 text",
            ]
        );

        // The table is created unconditionally, so a rerun fails.
        assert!(matches!(
            run_console_sample(&path, 1),
            Err(AdapterError::QueryExecution { .. })
        ));
    }
}

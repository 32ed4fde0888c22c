//! Property-based tests for the adapter's insert and query paths
//!
//! These tests verify that:
//! - N inserts into a fresh table read back as exactly N rows, in order
//! - Generated ids start at 1 and strictly increase
//! - Text values survive binding and materialization unchanged

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sqlite_adapter::{params, SqliteAdapter};

    const CREATE_SQL: &str =
        "CREATE TABLE Test (id INTEGER PRIMARY KEY AUTOINCREMENT, text VARCHAR(100))";

    fn fresh_adapter() -> SqliteAdapter {
        let db = SqliteAdapter::open_in_memory().unwrap();
        db.execute_non_query(CREATE_SQL, &[]).unwrap();
        db
    }

    fn arb_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 _'\"%-]{0,40}".prop_map(|s: String| s)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn inserted_rows_read_back_in_order(values in prop::collection::vec(arb_text(), 0..40)) {
            let db = fresh_adapter();
            for value in &values {
                db.execute_non_query("INSERT INTO Test (text) VALUES (?)", &params![value.as_str()]).unwrap();
            }

            let rows = db.execute_query("SELECT text FROM Test", &[]).unwrap();
            prop_assert_eq!(rows.len(), values.len());
            for (row, value) in rows.iter().zip(&values) {
                prop_assert_eq!(&row[0], value);
            }
        }

        #[test]
        fn insert_ids_strictly_increase_from_one(count in 1usize..50) {
            let db = fresh_adapter();
            let ids: Vec<i64> = (0..count)
                .map(|i| {
                    db.execute_insert("INSERT INTO Test (text) VALUES (?)", &params![i as i64])
                        .unwrap()
                })
                .collect();

            prop_assert_eq!(ids[0], 1);
            prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        }

        #[test]
        fn failed_insert_never_changes_row_count(good in 0usize..10) {
            let db = fresh_adapter();
            db.execute_non_query("CREATE TABLE strict (v TEXT NOT NULL)", &[]).unwrap();
            for _ in 0..good {
                db.execute_non_query("INSERT INTO strict VALUES ('ok')", &[]).unwrap();
            }

            let result = db.execute_non_query("INSERT INTO strict VALUES (?)", &params![None::<String>]);
            prop_assert!(result.is_err());
            prop_assert_eq!(db.execute_query("SELECT * FROM strict", &[]).unwrap().len(), good);
        }
    }
}

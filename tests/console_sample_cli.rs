//! Runs the console sample binary end to end.

use assert_cmd::Command;

#[test]
fn test_console_sample_prints_ten_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("testdb.db");

    let output = Command::cargo_bin("console_sample")
        .unwrap()
        .arg(&db_path)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "ID = 1, Name = this is 0 text");
    assert_eq!(lines[9], "ID = 10, Name = this is 9 text");
}

#[test]
fn test_console_sample_fails_when_table_exists() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("testdb.db");

    Command::cargo_bin("console_sample")
        .unwrap()
        .arg(&db_path)
        .assert()
        .success();

    Command::cargo_bin("console_sample")
        .unwrap()
        .arg(&db_path)
        .assert()
        .failure()
        .code(1);
}

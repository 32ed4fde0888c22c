use tracing::info;

use sqlite_adapter::{init_logging, sample};

const DEFAULT_DB_PATH: &str = "testdb.db";
const ROW_COUNT: usize = 10;

fn main() {
    init_logging("warn");

    // Optional first argument: database file to create the Test table in
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
    info!(path = %db_path, "running console sample");

    match sample::run_console_sample(&db_path, ROW_COUNT) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => {
            eprintln!("Console sample failed: {}", e);
            std::process::exit(1);
        }
    }
}

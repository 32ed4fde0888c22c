use std::path::PathBuf;
use tracing::{error, info};

use sqlite_adapter::{config, init_logging, sample};

fn main() {
    // Optional first argument: path to a TOML config file
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match config::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    // Initialize the logging system using tracing subscriber
    init_logging(&config.logging.level);

    info!("start");

    match sample::run_button_click(&config) {
        Ok(Some(rows)) => info!(rows = rows.len(), "button sample finished"),
        Ok(None) => info!("debug flag off, nothing to do"),
        Err(e) => error!(error = %e, "button sample failed"),
    }

    info!("end");
}

//! Survey Store CLI
//!
//! Command-line interface for collecting and exporting survey responses.
//!
//! # Usage
//!
//! ```bash
//! survey-store submit --name 王小明 --phone 0912345678 --region 台北市 --occupation 藥師
//! survey-store list --password <PASSWORD>
//! survey-store stats
//! survey-store export --password <PASSWORD> --output-dir exports/
//! survey-store import responses.csv
//! ```
//!
//! Global options (`--store-dir`, `--storage-key`, `--admin-password`) may also
//! be supplied through `SURVEY_STORE_DIR`, `SURVEY_STORAGE_KEY` and
//! `SURVEY_ADMIN_PASSWORD`. Log verbosity follows `RUST_LOG` (default `warn`);
//! logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid submission, wrong password, storage failure, etc.)

use std::process;
use survey_store::cli;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

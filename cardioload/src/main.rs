//! Loader binary entrypoint.
//!
//! Reads the heart failure CSV and materializes it into the SQLite
//! database the web server reads from. The actual load logic lives in
//! the `load` module; this file keeps argument parsing and process
//! exit behavior minimal.
//!
mod load;

use std::path::PathBuf;

use clap::Parser;

/// Load the heart failure CSV into the viewer database.
#[derive(Parser, Debug)]
#[command(name = "cardioload")]
struct Cli {
    /// Input CSV file with the 13-column clinical schema
    #[arg(long, env = "CARDIO_CSV", default_value = "database/heart_failure.csv")]
    csv: PathBuf,
    /// Target SQLite database file
    #[arg(long, env = "CARDIO_DB", default_value = "database/heart_failure.db")]
    db: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = load::run(&cli.csv, &cli.db) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

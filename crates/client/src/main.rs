//! Character sheet client binary.
//!
//! Composition root: reads configuration from the environment (and a `.env`
//! file when present), starts file logging, assembles the character service
//! and hands the terminal to the menu frontend.
//!
//! ```bash
//! # Throwaway session with nothing written to disk
//! SHEET_IN_MEMORY=1 cargo run -p sheet-client
//!
//! # Custom content and database
//! SHEET_DATA_DIR=./data SHEET_DATABASE=./sheets.sqlite3 cargo run -p sheet-client
//! ```

use std::io;

use anyhow::Result;
use client_bootstrap::{AppConfig, ServiceBuilder};
use client_frontend_cli::{Menu, logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = AppConfig::from_env();
    let session_id = config.session_id_or_default();

    // 2. Setup logging; the guard flushes the log file on drop
    let (_guard, _log_path) = logging::setup_logging(&config.log_root(), &session_id)?;

    tracing::info!("Starting character sheet client");
    tracing::info!("Session ID: {session_id}");
    tracing::info!("Content: {}", config.data_dir.display());

    // 3. Build the service
    let setup = ServiceBuilder::new(config).build()?;
    tracing::info!(
        mods = setup.service.content().catalog.len(),
        "Service built successfully"
    );

    // 4. Run the menu on the terminal
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&setup.service, stdin.lock(), stdout.lock()).run()?;

    tracing::info!("Client shutdown complete");
    Ok(())
}

//! TrackNote Packager - release packaging pipeline for the TrackNote app.
//!
//! This binary drives the platform-specific packaging steps (Windows
//! executable, macOS .app bundle, .dmg disk image, customer zip package)
//! with proper prerequisite checks and artifact verification.

use std::process;

use tracknote_packager::cli;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}

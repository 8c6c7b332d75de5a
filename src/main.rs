//! Amiya Packager - Release packager for the AmiyaBot application.
//!
//! This binary builds the platform-specific release archive (application
//! executable, configuration, framework assets, data dictionaries) and
//! optionally publishes it to object storage.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match amiya_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}

// src/utils/env.rs

use log::debug;

/// Loads a local .env file if one is present. Missing files are fine; real
/// environment variables always take precedence over file entries.
pub fn load_env() {
    if dotenv::dotenv().is_ok() {
        debug!("Loaded environment overrides from .env");
    }
}

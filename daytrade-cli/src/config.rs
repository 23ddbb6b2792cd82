//! `.env` loading for the daytrade CLI

use std::path::PathBuf;

/// Load environment variables from .env files in multiple locations
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.daytrade/.env
///
/// dotenvy never overwrites a variable that is already set, so loading
/// in this order gives the priority above. Runs before argument parsing
/// so clap's `env` fallbacks see these values; returns the files loaded
/// for logging once tracing is up.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Log which .env files were applied
pub fn log_loaded(loaded_from: &[PathBuf]) {
    if loaded_from.is_empty() {
        tracing::debug!("Using environment variables only (no .env file found)");
    } else {
        let paths: Vec<String> = loaded_from
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        tracing::info!("Loaded configuration from: {}", paths.join(", "));
    }
}

/// Get the daytrade config directory path (~/.daytrade)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".daytrade"))
}

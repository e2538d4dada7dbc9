mod config;
mod state_file;

pub use config::{Config, ConfigError, GroupDefaults};
pub use state_file::{JsonStateFile, PersistenceAdapter, StorageError};

use std::path::PathBuf;

/// Returns `~/.config/wichtel[-dev]/` based on WICHTEL_ENV.
///
/// Set WICHTEL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WICHTEL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("wichtel-dev")
    } else {
        base_dir.join("wichtel")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

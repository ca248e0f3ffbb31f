//! Setup module for initial application configuration.
//!
//! Handles first-run setup by writing a default config file. There is nothing
//! interactive to ask: every setting has a sensible default, so setup is just
//! serializing the defaults with a version prefix.

pub mod version;

use crate::config::{config_path, VoxtwinConfig};

/// Current application version from Cargo.toml
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the setup process: writes the default config file.
///
/// Called when the config file is missing or carries an older version. Any
/// existing file is replaced wholesale; the config holds only presentation
/// defaults, so there is nothing worth migrating field by field.
///
/// # Errors
/// Returns an error if the config path cannot be determined or written.
pub fn run_setup() -> anyhow::Result<()> {
    let config_path = config_path()?;

    let defaults = toml::to_string_pretty(&VoxtwinConfig::default())?;
    let full_config = format!("config_version = \"{CURRENT_VERSION}\"\n{defaults}");
    std::fs::write(&config_path, full_config)?;

    tracing::info!("Default configuration written to {}", config_path.display());
    Ok(())
}

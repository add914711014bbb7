//! Configuration loading from `~/.mnemo/config.toml` with defaults.

use mnemo_types::config::{mnemo_home, MnemoConfig};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load configuration from a TOML file, falling back to defaults.
///
/// A missing file is normal. An unreadable or malformed one is reported and
/// ignored.
pub fn load_config(path: Option<&Path>) -> MnemoConfig {
    let config_path = path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(default_config_path);

    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        return MnemoConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(contents) => match toml::from_str::<MnemoConfig>(&contents) {
            Ok(config) => {
                info!(path = %config_path.display(), "Loaded configuration");
                config
            }
            Err(e) => {
                warn!(
                    error = %e,
                    path = %config_path.display(),
                    "Failed to parse config, using defaults"
                );
                MnemoConfig::default()
            }
        },
        Err(e) => {
            warn!(
                error = %e,
                path = %config_path.display(),
                "Failed to read config file, using defaults"
            );
            MnemoConfig::default()
        }
    }
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    mnemo_home().join("config.toml")
}

//! Configuration for the mnemo store and its command-line front end.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default table holding memory entries.
pub const DEFAULT_TABLE_NAME: &str = "memories";

/// Top-level configuration, usually read from `~/.mnemo/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MnemoConfig {
    /// SQLite database file. `:memory:` gives an ephemeral store.
    pub db_path: PathBuf,
    /// Table the entries live in.
    pub table_name: String,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for MnemoConfig {
    fn default() -> Self {
        Self {
            db_path: mnemo_home().join("memory.db"),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// The mnemo home directory (`~/.mnemo`).
pub fn mnemo_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".mnemo")
}

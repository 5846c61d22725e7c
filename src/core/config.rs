use crate::core::dirs::get_config_directory;
use crate::core::error::{ArtchiveError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Engine settings, read from `<config dir>/artchive/config.json`.
///
/// Every field has a default, so a partial file is valid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Binary invoked for `status --porcelain`
    pub git_binary: String,
    /// Upper bound on how long a listing request waits for its recompute
    pub recompute_timeout_secs: u64,
    /// Drop results of recomputes that were overtaken by a newer request
    pub coalesce_recomputes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            git_binary: "git".to_string(),
            recompute_timeout_secs: 10,
            coalesce_recomputes: true,
        }
    }
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults if the file is absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ArtchiveError::config_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| ArtchiveError::config_parse_failed(path, e))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn recompute_timeout(&self) -> Duration {
        Duration::from_secs(self.recompute_timeout_secs)
    }
}

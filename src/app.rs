use directories::{BaseDirs, ProjectDirs};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChatError, Result};

const CONFIG_FILE: &str = "lovestory-chat.toml";
const DB_FILE: &str = "chat.sqlite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the chat database lives. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    /// Report invalid input as errors instead of ignoring it.
    pub strict_validation: bool,
    /// Fixed RNG seed, for reproducible replies and typing delays.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "warn".to_string(),
            strict_validation: false,
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join(CONFIG_FILE))
    }

    fn default_data_dir() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "LoveStoryChat")?;
        Some(proj.data_dir().to_path_buf())
    }

    /// Loads the user config, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<AppConfig>(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| ChatError::Config("no config dir".into()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self).map_err(|e| ChatError::Config(e.to_string()))?;
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => Self::default_data_dir().ok_or_else(|| ChatError::Config("no data dir".into()))?,
        };
        Ok(dir.join(DB_FILE))
    }
}

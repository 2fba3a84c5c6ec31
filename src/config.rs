use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the movie service; endpoints live under `/api`.
    pub api_url: String,
    /// Number of results requested per search.
    pub top_k: usize,
    pub request_timeout_secs: u64,
    pub trailer_embed_base: String,
    /// Command used to open links. Empty means auto-detect.
    pub opener: String,
    pub log_level: String,
    /// Empty means the default location under the data directory.
    pub log_file: String,
}

impl Config {
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path()?)
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&contents).context("Failed to parse config file")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string).context("Failed to write config file")?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(anyhow::anyhow!("No config directory found"))?;
        Ok(config_dir.join("cinematch/config.toml"))
    }

    /// Command-line flags win over the file for this run only.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(top_k) = cli.top_k {
            self.top_k = top_k;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        if !self.log_file.is_empty() {
            return Some(PathBuf::from(&self.log_file));
        }
        dirs::data_local_dir().map(|dir| dir.join("cinematch/cinematch.log"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            top_k: 80,
            request_timeout_secs: 30,
            trailer_embed_base: "https://www.youtube.com/embed/".to_string(),
            opener: String::new(),
            log_level: "info".to_string(),
            log_file: String::new(),
        }
    }
}

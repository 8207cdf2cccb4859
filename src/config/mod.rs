use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Defaults for every command-line option, read from
/// `<config_dir>/transcript-batch/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the web app, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Timeout in seconds for a single transcription request
    pub timeout_seconds: u64,
    /// Delay in seconds between two transcription requests
    pub sleep_seconds: f64,
    /// Browser to read the session cookie from (`auto`, `edge`, `chrome`, ...)
    pub browser: String,
    /// Input spreadsheet used when `--input` is not given
    pub input: PathBuf,
    /// Directory for timestamped output files when `--output` is not given
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_seconds: 600,
            sleep_seconds: 0.5,
            browser: "auto".to_string(),
            input: PathBuf::from("Data").join("sample_input.xlsx"),
            output_dir: PathBuf::from("Data"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config = Self::from_toml(&content)?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

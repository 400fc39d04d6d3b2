use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::provider::Provider;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2:latest";
pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 1000;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub provider: Option<String>,
    pub ollama_url: Option<String>,
    pub default_model: Option<String>,
    pub response_delay_ms: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            provider: Some(Provider::Canned.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    pub fn provider(&self) -> Provider {
        self.provider
            .as_deref()
            .and_then(Provider::from_str)
            .unwrap_or_default()
    }

    pub fn ollama_url(&self) -> &str {
        self.ollama_url.as_deref().unwrap_or(DEFAULT_OLLAMA_URL)
    }

    pub fn model(&self) -> &str {
        self.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn response_delay_ms(&self) -> u64 {
        self.response_delay_ms.unwrap_or(DEFAULT_RESPONSE_DELAY_MS)
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.json"))
    }
}

/// Directory holding config, preferences and the log file.
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;

    Ok(config_dir.join("fission"))
}

pub fn preferences_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("preferences.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.provider(), Provider::Canned);
        assert_eq!(config.ollama_url(), DEFAULT_OLLAMA_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.response_delay_ms(), DEFAULT_RESPONSE_DELAY_MS);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fission").join("config.json");

        let config = Config {
            provider: Some("ollama".to_string()),
            ollama_url: Some("http://10.0.0.2:11434".to_string()),
            default_model: Some("gemma3:latest".to_string()),
            response_delay_ms: Some(0),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider(), Provider::Ollama);
        assert_eq!(loaded.ollama_url(), "http://10.0.0.2:11434");
        assert_eq!(loaded.model(), "gemma3:latest");
        assert_eq!(loaded.response_delay_ms(), 0);
    }

    #[test]
    fn test_unknown_provider_falls_back_to_canned() {
        let config = Config {
            provider: Some("openai".to_string()),
            ..Config::default()
        };
        assert_eq!(config.provider(), Provider::Canned);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}

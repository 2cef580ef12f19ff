use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ClientError, Result};

/// Env var that overrides the configured API base URL.
pub const API_URL_ENV: &str = "PEOPLES_AGENT_API_URL";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of The People's Agent backend.
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageSettings {
    /// Override for the credentials file location. Defaults to
    /// `<config dir>/peoples-agent/credentials.toml` when absent.
    pub credentials_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            storage: StorageSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the config file, falling back to defaults when the
    /// file is missing or unparsable.
    pub fn load() -> Self {
        let path = Self::config_path();
        if let Ok(content) = std::fs::read_to_string(&path) {
            toml::from_str(&content).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("peoples-agent")
            .join("config.toml")
    }

    /// Effective API base URL: the env override wins over the settings file.
    pub fn api_url(&self) -> String {
        std::env::var(API_URL_ENV).unwrap_or_else(|_| self.api.base_url.clone())
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::TokenPair;
use crate::error::Result;

/// Tokens persisted across restarts (stored at
/// `<config dir>/peoples-agent/credentials.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Durable token storage. Only `SessionStore` writes here; everything else
/// reads the in-memory token instead.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            path: default_credentials_path(),
        }
    }

    /// Store backed by an explicit file, for tests and the
    /// `storage.credentials_path` setting.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> StoredTokens {
        if let Ok(content) = std::fs::read_to_string(&self.path) {
            toml::from_str(&content).unwrap_or_default()
        } else {
            StoredTokens::default()
        }
    }

    pub fn save(&self, tokens: &TokenPair) -> Result<()> {
        let stored = StoredTokens {
            access_token: Some(tokens.access_token.clone()),
            refresh_token: Some(tokens.refresh_token.clone()),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(&stored).map_err(|e| crate::error::ClientError::Config(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove both tokens. Missing file counts as already cleared.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

fn default_credentials_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("peoples-agent")
        .join("credentials.toml")
}

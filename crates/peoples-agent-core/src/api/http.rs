use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::{AgentApi, ChatReply, DocUpdate, HistoryEntry, TokenPair, UserProfile};
use crate::config::Settings;
use crate::error::{ClientError, Result};

/// HTTP client for The People's Agent backend.
#[derive(Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdatesFeed {
    #[serde(default)]
    updates: Vec<DocUpdate>,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_url())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Extract the server's `detail` message, falling back to a generic one.
    async fn auth_failure(resp: reqwest::Response, fallback: &str) -> ClientError {
        let detail = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| fallback.to_string());
        ClientError::Authentication(detail)
    }
}

#[async_trait::async_trait]
impl AgentApi for HttpApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(Self::auth_failure(resp, "Login failed").await)
        }
    }

    async fn signup(&self, email: &str, username: &str, password: &str) -> Result<TokenPair> {
        let resp = self
            .http
            .post(self.url("/auth/signup"))
            .json(&json!({ "email": email, "username": username, "password": password }))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(Self::auth_failure(resp, "Signup failed").await)
        }
    }

    async fn profile(&self, token: &str) -> Result<UserProfile> {
        let resp = self
            .http
            .get(self.url("/auth/profile"))
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(ClientError::SessionInvalid)
        }
    }

    async fn chat(&self, token: &str, query: &str) -> Result<ChatReply> {
        let resp = self
            .http
            .post(self.url("/chat"))
            .bearer_auth(token)
            .json(&json!({ "query": query }))
            .send()
            .await?;
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(ClientError::SessionInvalid),
            _ => Ok(resp.error_for_status()?.json().await?),
        }
    }

    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>> {
        let resp = self
            .http
            .get(self.url("/chat/history"))
            .bearer_auth(token)
            .send()
            .await?;
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(ClientError::SessionInvalid),
            _ => Ok(resp.error_for_status()?.json().await?),
        }
    }

    async fn clear_history(&self, token: &str) -> Result<()> {
        let resp = self
            .http
            .delete(self.url("/chat/history"))
            .bearer_auth(token)
            .send()
            .await?;
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(ClientError::SessionInvalid),
            _ => {
                resp.error_for_status()?;
                Ok(())
            }
        }
    }

    async fn updates(&self) -> Result<Vec<DocUpdate>> {
        let resp = self.http.get(self.url("/updates")).send().await?;
        let feed: UpdatesFeed = resp.error_for_status()?.json().await?;
        Ok(feed.updates)
    }
}

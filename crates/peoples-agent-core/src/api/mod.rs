//! The seam to the remote People's Agent service.
//!
//! Everything that touches the network goes through the [`AgentApi`] trait;
//! the shipped implementation is [`HttpApiClient`], and tests substitute an
//! in-memory fake.

mod http;

pub use http::HttpApiClient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Token pair returned by the login and signup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// The authenticated user's account record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Answer to a single chat query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// One persisted message as the service returns it (newest-first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Option<String>,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// A recently indexed government document from the updates feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocUpdate {
    pub title: String,
    pub url: String,
    pub date: String,
}

#[async_trait::async_trait]
pub trait AgentApi: Send + Sync {
    /// `POST /auth/login`. Rejections carry the server's `detail` message.
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair>;

    /// `POST /auth/signup`. Same shape and failure contract as `login`.
    async fn signup(&self, email: &str, username: &str, password: &str) -> Result<TokenPair>;

    /// `GET /auth/profile`. Any non-success status means the token is no
    /// longer valid.
    async fn profile(&self, token: &str) -> Result<UserProfile>;

    /// `POST /chat`. A 401 maps to [`ClientError::SessionInvalid`].
    ///
    /// [`ClientError::SessionInvalid`]: crate::ClientError::SessionInvalid
    async fn chat(&self, token: &str, query: &str) -> Result<ChatReply>;

    /// `GET /chat/history`, newest-first.
    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>>;

    /// `DELETE /chat/history`.
    async fn clear_history(&self, token: &str) -> Result<()>;

    /// `GET /updates` — latest indexed documents, no auth required.
    async fn updates(&self) -> Result<Vec<DocUpdate>>;
}

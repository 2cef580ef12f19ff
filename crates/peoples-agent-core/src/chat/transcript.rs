use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{HistoryEntry, Role};

/// Opening assistant message. Local-only: it has no id, is never sent to the
/// service, and never comes back from it.
pub const GREETING: &str = "Hello! I'm The People's Agent. Ask me anything about \
government programs, policies, and public documents.";

/// One entry in the live transcript. Locally composed messages carry no id
/// until the next authoritative history read replaces them with the
/// persisted record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Option<String>,
    pub role: Role,
    pub content: String,
    pub sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn greeting() -> Self {
        Self {
            id: None,
            role: Role::Assistant,
            content: GREETING.to_string(),
            sources: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: None,
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            id: None,
            role: Role::Assistant,
            content: content.into(),
            sources,
            timestamp: Utc::now(),
        }
    }
}

impl From<HistoryEntry> for ChatMessage {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            role: entry.role,
            content: entry.content,
            sources: entry.sources,
            timestamp: entry.timestamp,
        }
    }
}

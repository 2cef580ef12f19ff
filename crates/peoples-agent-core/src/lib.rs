pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod routing;

// Re-export key types
pub use api::{AgentApi, ChatReply, DocUpdate, HistoryEntry, HttpApiClient, Role, TokenPair, UserProfile};
pub use auth::{CredentialStore, SessionStore, StoredTokens};
pub use chat::{relative_time, ChatMessage, ConversationManager};
pub use config::Settings;
pub use error::{ClientError, Result};
pub use routing::{Navigator, Route, RouteDecision};

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};

use peoples_agent_core::api::{
    AgentApi, ChatReply, DocUpdate, HistoryEntry, Role, TokenPair, UserProfile,
};
use peoples_agent_core::error::{ClientError, Result};
use peoples_agent_core::routing::{Navigator, Route};
use peoples_agent_core::{CredentialStore, SessionStore};

pub const EMAIL: &str = "citizen@example.gov";
pub const PASSWORD: &str = "password123";
pub const ACCESS_TOKEN: &str = "acc-1";
pub const LOGIN_DETAIL: &str = "Incorrect email or password";

/// In-memory stand-in for the remote service. Tracks every call so tests
/// can assert on ordering and on the absence of network traffic.
pub struct FakeApi {
    pub calls: Mutex<Vec<&'static str>>,
    valid_tokens: Mutex<HashSet<String>>,
    /// Persisted history as the service would return it: newest-first.
    pub server_history: Mutex<Vec<HistoryEntry>>,
    pub chat_fail: AtomicBool,
    pub history_fail: AtomicBool,
    pub profile_fail: AtomicBool,
    next_id: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            valid_tokens: Mutex::new(HashSet::new()),
            server_history: Mutex::new(Vec::new()),
            chat_fail: AtomicBool::new(false),
            history_fail: AtomicBool::new(false),
            profile_fail: AtomicBool::new(false),
            next_id: AtomicUsize::new(1),
        })
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn accept_token(&self, token: &str) {
        self.valid_tokens.lock().unwrap().insert(token.to_string());
    }

    pub fn revoke_token(&self, token: &str) {
        self.valid_tokens.lock().unwrap().remove(token);
    }

    /// Seed the persisted history with `n` user/assistant exchanges,
    /// newest-first, with ascending timestamps.
    pub fn seed_history(&self, n: usize) {
        let mut entries = Vec::new();
        for i in 0..n {
            entries.push(history_entry(i, Role::User, &format!("question {i}")));
        }
        entries.reverse();
        *self.server_history.lock().unwrap() = entries;
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn check(&self, token: &str) -> Result<()> {
        if self.valid_tokens.lock().unwrap().contains(token) {
            Ok(())
        } else {
            Err(ClientError::SessionInvalid)
        }
    }
}

pub fn history_entry(i: usize, role: Role, content: &str) -> HistoryEntry {
    HistoryEntry {
        id: Some(format!("m-{i}")),
        role,
        content: content.to_string(),
        sources: Vec::new(),
        timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(i as i64),
    }
}

/// A decode failure, standing in for any non-auth request breakage.
pub fn broken() -> ClientError {
    serde_json::from_str::<serde_json::Value>("{").unwrap_err().into()
}

#[async_trait::async_trait]
impl AgentApi for FakeApi {
    async fn login(&self, _email: &str, password: &str) -> Result<TokenPair> {
        self.record("login");
        if password != PASSWORD {
            return Err(ClientError::Authentication(LOGIN_DETAIL.to_string()));
        }
        let pair = TokenPair {
            access_token: ACCESS_TOKEN.to_string(),
            refresh_token: "ref-1".to_string(),
        };
        self.accept_token(&pair.access_token);
        Ok(pair)
    }

    async fn signup(&self, _email: &str, _username: &str, password: &str) -> Result<TokenPair> {
        self.record("signup");
        if password.len() < 8 {
            return Err(ClientError::Authentication(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        let pair = TokenPair {
            access_token: ACCESS_TOKEN.to_string(),
            refresh_token: "ref-1".to_string(),
        };
        self.accept_token(&pair.access_token);
        Ok(pair)
    }

    async fn profile(&self, token: &str) -> Result<UserProfile> {
        self.record("profile");
        if self.profile_fail.load(Ordering::SeqCst) {
            return Err(broken());
        }
        self.check(token)?;
        Ok(UserProfile {
            id: "u-1".to_string(),
            email: EMAIL.to_string(),
            username: "citizen".to_string(),
            created_at: Utc.timestamp_opt(1_690_000_000, 0).unwrap(),
            last_login: None,
        })
    }

    async fn chat(&self, token: &str, query: &str) -> Result<ChatReply> {
        self.record("chat");
        if self.chat_fail.load(Ordering::SeqCst) {
            return Err(broken());
        }
        self.check(token)?;

        // Persist the exchange the way the backend would, newest-first.
        let base = self.next_id.fetch_add(2, Ordering::SeqCst) + 100;
        let answer = format!("According to the records: {query}");
        let mut history = self.server_history.lock().unwrap();
        history.insert(0, history_entry(base, Role::User, query));
        history.insert(0, history_entry(base + 1, Role::Assistant, &answer));

        Ok(ChatReply {
            answer,
            sources: vec!["https://docs.example.gov/policy.pdf".to_string()],
        })
    }

    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>> {
        self.record("history");
        if self.history_fail.load(Ordering::SeqCst) {
            return Err(broken());
        }
        self.check(token)?;
        Ok(self.server_history.lock().unwrap().clone())
    }

    async fn clear_history(&self, token: &str) -> Result<()> {
        self.record("clear_history");
        self.check(token)?;
        self.server_history.lock().unwrap().clear();
        Ok(())
    }

    async fn updates(&self) -> Result<Vec<DocUpdate>> {
        self.record("updates");
        Ok(vec![DocUpdate {
            title: "Housing Assistance Guidelines".to_string(),
            url: "https://docs.example.gov/housing.pdf".to_string(),
            date: "Recently Indexed".to_string(),
        }])
    }
}

/// Navigator that just records where it was told to go.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().unwrap().last().copied()
    }

    pub fn count(&self) -> usize {
        self.routes.lock().unwrap().len()
    }

    pub fn reset(&self) {
        self.routes.lock().unwrap().clear();
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Session wired to a tempdir-backed credential store.
pub fn session_with(
    api: Arc<FakeApi>,
    navigator: Arc<RecordingNavigator>,
    dir: &std::path::Path,
) -> SessionStore {
    let credentials = CredentialStore::with_path(dir.join("credentials.toml"));
    SessionStore::new(api, credentials, navigator)
}

/// Freshly logged-in session, with the call and navigation logs wiped
/// afterwards so tests only see their own traffic.
pub async fn authenticated_session(
    api: &Arc<FakeApi>,
    navigator: &Arc<RecordingNavigator>,
    dir: &std::path::Path,
) -> SessionStore {
    let mut session = session_with(api.clone(), navigator.clone(), dir);
    session.restore().await;
    session.login(EMAIL, PASSWORD).await.unwrap();
    api.reset_calls();
    navigator.reset();
    session
}

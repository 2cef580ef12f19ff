use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::AgentApi;
use crate::auth::SessionStore;
use crate::chat::transcript::ChatMessage;
use crate::error::ClientError;
use crate::routing::{Navigator, Route};

/// Shown in place of an answer when the query fails for any reason other
/// than an expired session.
const ANSWER_FAILED: &str =
    "Sorry, I couldn't reach the document service just now. Please try again.";

/// Owns the live transcript and reconciles it against the persisted history.
///
/// All operations take `&mut self`, so a second `send` cannot start while
/// one is awaiting the service; overlapping sends are rejected by
/// construction rather than queued.
pub struct ConversationManager {
    api: Arc<dyn AgentApi>,
    navigator: Arc<dyn Navigator>,
    greeting: ChatMessage,
    transcript: Vec<ChatMessage>,
    history: Vec<ChatMessage>,
}

impl ConversationManager {
    pub fn new(api: Arc<dyn AgentApi>, navigator: Arc<dyn Navigator>) -> Self {
        let greeting = ChatMessage::greeting();
        Self {
            api,
            navigator,
            transcript: vec![greeting.clone()],
            greeting,
            history: Vec::new(),
        }
    }

    /// Live transcript, greeting first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Full persisted history, oldest-first. Empty until `load_history`
    /// succeeds.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Fetch the persisted transcript and rebuild the live one from it.
    /// The service returns newest-first; display order is oldest-first.
    /// Best-effort: on failure the current transcript stays as it is.
    pub async fn load_history(&mut self, session: &SessionStore) {
        if !session.is_authenticated() {
            return;
        }
        let Some(token) = session.access_token() else {
            return;
        };
        match self.api.history(token).await {
            Ok(mut entries) => {
                entries.reverse();
                self.history = entries.into_iter().map(ChatMessage::from).collect();
                self.transcript = self.rebuilt(self.history.clone());
            }
            Err(err) => debug!("history refresh skipped: {err}"),
        }
    }

    /// Submit a query. The user message lands in the transcript before the
    /// request goes out; the reply, an error notice, or a redirect to
    /// sign-in resolves it. Blank input and unauthenticated sessions are
    /// ignored.
    pub async fn send(&mut self, session: &SessionStore, text: &str) {
        let text = text.trim();
        if text.is_empty() || !session.is_authenticated() {
            return;
        }
        let Some(token) = session.access_token().map(str::to_owned) else {
            return;
        };

        self.transcript.push(ChatMessage::user(text));

        match self.api.chat(&token, text).await {
            Ok(reply) => {
                self.transcript
                    .push(ChatMessage::assistant(reply.answer, reply.sources));
                // Reconcile with the server's record; the optimistic entries
                // get replaced by their persisted counterparts.
                self.load_history(session).await;
            }
            Err(ClientError::SessionInvalid) => {
                // The unresolved user message stays in the transcript.
                self.navigator.navigate(Route::SignIn);
            }
            Err(err) => {
                warn!("chat request failed: {err}");
                self.transcript
                    .push(ChatMessage::assistant(ANSWER_FAILED, Vec::new()));
            }
        }
    }

    /// Focus the transcript on a past exchange: greeting plus the history
    /// slice `[anchor - radius, anchor + radius]`, clamped at both ends.
    pub fn window_history(&mut self, anchor: usize, radius: usize) {
        let end = self
            .history
            .len()
            .min(anchor.saturating_add(radius).saturating_add(1));
        let start = anchor.saturating_sub(radius).min(end);
        let slice = self.history[start..end].to_vec();
        self.transcript = self.rebuilt(slice);
    }

    /// Ask the service to drop the persisted history, then reset the local
    /// view to just the greeting. Fire-and-forget: a failed delete is
    /// logged and the local reset happens regardless.
    pub async fn clear_history(&mut self, session: &SessionStore) {
        if let Some(token) = session.access_token() {
            if let Err(err) = self.api.clear_history(token).await {
                warn!("history delete failed: {err}");
            }
        }
        self.history.clear();
        self.transcript = vec![self.greeting.clone()];
    }

    fn rebuilt(&self, tail: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let mut transcript = Vec::with_capacity(tail.len() + 1);
        transcript.push(self.greeting.clone());
        transcript.extend(tail);
        transcript
    }
}

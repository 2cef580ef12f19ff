use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{AgentApi, TokenPair, UserProfile};
use crate::auth::CredentialStore;
use crate::error::{ClientError, Result};
use crate::routing::{self, Navigator, Route, RouteDecision};

/// Owns the authenticated identity and credential state of the current user.
///
/// One instance per process, injected into whatever consumes it. `restore`
/// is the initialization step and must run exactly once, before the shell
/// enters its loop; a second call would race the first.
pub struct SessionStore {
    api: Arc<dyn AgentApi>,
    credentials: CredentialStore,
    navigator: Arc<dyn Navigator>,
    user: Option<UserProfile>,
    access_token: Option<String>,
    loading: bool,
}

impl SessionStore {
    pub fn new(
        api: Arc<dyn AgentApi>,
        credentials: CredentialStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            credentials,
            navigator,
            user: None,
            access_token: None,
            // Held until the initial restore attempt resolves.
            loading: true,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// True while the startup restoration attempt is still unresolved.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once the token has been validated by a profile fetch. A bare
    /// token is not enough.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }

    /// Route-guard verdict for the requested view.
    pub fn route_decision(&self, current: Route) -> RouteDecision {
        routing::evaluate(self.is_authenticated(), self.loading, current)
    }

    /// Silent session restoration at startup. With no persisted token this
    /// only resolves the loading flag; otherwise the token is adopted and
    /// validated against the profile endpoint.
    pub async fn restore(&mut self) {
        match self.credentials.load().access_token {
            Some(token) => {
                self.access_token = Some(token.clone());
                self.fetch_profile(&token).await;
            }
            None => self.loading = false,
        }
    }

    /// Validate `token` and populate the user record. A rejected token
    /// clears the session, persisted tokens included; transport failures
    /// are logged and leave the token in place. The loading flag is
    /// released on every exit path.
    pub async fn fetch_profile(&mut self, token: &str) {
        match self.api.profile(token).await {
            Ok(profile) => self.user = Some(profile),
            Err(ClientError::SessionInvalid) => {
                debug!("stored access token rejected, clearing session");
                if let Err(err) = self.credentials.clear() {
                    warn!("failed to clear stored credentials: {err}");
                }
                self.access_token = None;
                self.user = None;
            }
            Err(err) => {
                // Startup path with no error surface; leave state unresolved.
                warn!("profile fetch failed: {err}");
            }
        }
        self.loading = false;
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(ClientError::Validation("email"));
        }
        if password.is_empty() {
            return Err(ClientError::Validation("password"));
        }
        let tokens = self.api.login(email, password).await?;
        self.establish(tokens).await
    }

    pub async fn signup(&mut self, email: &str, username: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(ClientError::Validation("email"));
        }
        if username.trim().is_empty() {
            return Err(ClientError::Validation("username"));
        }
        if password.is_empty() {
            return Err(ClientError::Validation("password"));
        }
        let tokens = self.api.signup(email, username, password).await?;
        self.establish(tokens).await
    }

    /// Local-only invalidation; the service is not notified.
    pub fn logout(&mut self) {
        if let Err(err) = self.credentials.clear() {
            warn!("failed to clear stored credentials: {err}");
        }
        self.user = None;
        self.access_token = None;
        self.navigator.navigate(Route::SignIn);
    }

    /// Persist and adopt a fresh token pair, then validate it. The profile
    /// fetch completes before the navigation signal so the chat view never
    /// renders without a user.
    async fn establish(&mut self, tokens: TokenPair) -> Result<()> {
        self.credentials.save(&tokens)?;
        let access = tokens.access_token.clone();
        self.access_token = Some(access.clone());
        self.fetch_profile(&access).await;
        self.navigator.navigate(Route::Chat);
        Ok(())
    }
}

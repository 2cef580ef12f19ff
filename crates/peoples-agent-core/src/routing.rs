//! Route protection: a pure verdict over session state, plus the navigation
//! seam the session and chat layers signal through.

/// The two views the client knows about. `SignIn` is public; `Chat` is the
/// default protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Chat,
}

impl Route {
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Chat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session restoration still pending; show a neutral waiting state.
    Wait,
    /// Render the requested view as-is.
    Render,
    /// Navigate elsewhere instead.
    Redirect(Route),
}

/// Pure function of `(authenticated, loading, current)`; never mutates
/// session state. Callers re-evaluate whenever either input changes.
pub fn evaluate(authenticated: bool, loading: bool, current: Route) -> RouteDecision {
    if loading {
        return RouteDecision::Wait;
    }
    match (authenticated, current) {
        (false, route) if route.is_protected() => RouteDecision::Redirect(Route::SignIn),
        (true, Route::SignIn) => RouteDecision::Redirect(Route::Chat),
        _ => RouteDecision::Render,
    }
}

/// Receives navigation signals from the session and conversation layers.
/// Implemented by the shell; redirecting is its only responsibility.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

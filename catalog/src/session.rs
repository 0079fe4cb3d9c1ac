//! Session state container for the signed-in user.
//!
//! DESIGN
//! ======
//! All state mutations go through [`reduce`], which takes the current state
//! and an action, mutates the state, and returns the side effects the caller
//! must execute (cookie writes, notifications, movie refresh). The reducer
//! never performs I/O. [`SessionStore`] is the async orchestrator: it
//! dispatches the pending action, awaits the gateway, dispatches the outcome
//! and hands the collected effects back.
//!
//! The store is owned by one task and mutated through `&mut self`. Two
//! operations are never arbitrated against each other; whichever outcome is
//! dispatched last wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::gateway::{AuthGateway, Credentials, GatewayError, NewUser};
use crate::types::Principal;

/// Fixed error stored and shown on any failed login, whatever the upstream said.
pub const LOGIN_FAILED_MESSAGE: &str = "Incorrect user or password";

pub const REGISTERED_MESSAGE: &str = "User created successfully!";

/// Cookies mirrored from the principal on login.
pub const IDENTITY_COOKIES: [&str; 3] = ["id", "name", "email"];

/// Cookies cleared on logout.
pub const SESSION_COOKIES: [&str; 4] = ["id", "name", "email", "token"];

// =============================================================================
// STATE
// =============================================================================

/// Identity of the current user plus request status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub id: String,
    pub name: String,
    pub email: String,
    /// True only while a register/login request is outstanding.
    pub loading: bool,
    /// Empty when there is no error.
    pub error: String,
}

impl SessionState {
    /// Whether any identity field is populated.
    #[must_use]
    pub fn has_user(&self) -> bool {
        !(self.id.is_empty() && self.name.is_empty() && self.email.is_empty())
    }
}

// =============================================================================
// ACTIONS & EFFECTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    RegisterPending,
    RegisterFulfilled(Principal),
    /// Carries the upstream message to store verbatim.
    RegisterRejected(String),
    LoginPending,
    LoginFulfilled(Principal),
    LoginRejected,
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }
}

/// Side effects returned by [`reduce`] for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a transient notification.
    Notify(Notification),
    /// Write a plain (not http-only) cookie. An empty value clears it.
    SetCookie { name: &'static str, value: String },
    /// Reload the movie lists for the newly signed-in user.
    RefreshMovies,
}

/// Effects that clear every session cookie. Logout itself does not emit
/// these; the caller decides when to run them.
#[must_use]
pub fn clear_cookie_effects() -> Vec<Effect> {
    SESSION_COOKIES
        .into_iter()
        .map(|name| Effect::SetCookie { name, value: String::new() })
        .collect()
}

// =============================================================================
// REDUCER
// =============================================================================

/// Apply `action` to `state` and return the effects it produces.
pub fn reduce(state: &mut SessionState, action: SessionAction) -> Vec<Effect> {
    match action {
        SessionAction::RegisterPending | SessionAction::LoginPending => {
            state.loading = true;
            vec![]
        }
        SessionAction::RegisterFulfilled(principal) => {
            state.name = principal.name;
            state.loading = false;
            state.error.clear();
            vec![Effect::Notify(Notification::success(REGISTERED_MESSAGE))]
        }
        SessionAction::RegisterRejected(message) => {
            state.loading = false;
            state.error.clone_from(&message);
            vec![Effect::Notify(Notification::error(message))]
        }
        SessionAction::LoginFulfilled(principal) => {
            let cookies = IDENTITY_COOKIES
                .into_iter()
                .zip([&principal.id, &principal.name, &principal.email])
                .map(|(name, value)| Effect::SetCookie { name, value: value.clone() });
            let effects = cookies.chain([Effect::RefreshMovies]).collect();

            state.id = principal.id;
            state.name = principal.name;
            state.email = principal.email;
            state.loading = false;
            state.error.clear();
            effects
        }
        SessionAction::LoginRejected => {
            state.loading = false;
            state.error = LOGIN_FAILED_MESSAGE.to_owned();
            vec![Effect::Notify(Notification::error(LOGIN_FAILED_MESSAGE))]
        }
        SessionAction::Logout => {
            state.id.clear();
            state.name.clear();
            state.email.clear();
            vec![]
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Outcome of an async session operation.
#[derive(Debug)]
pub struct Dispatch {
    pub result: Result<Principal, GatewayError>,
    pub effects: Vec<Effect>,
}

/// Owns a [`SessionState`] and runs register/login against an [`AuthGateway`].
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously persisted or preloaded state.
    #[must_use]
    pub fn from_state(state: SessionState) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn user(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    #[must_use]
    pub fn error(&self) -> &str {
        &self.state.error
    }

    #[must_use]
    pub fn has_user(&self) -> bool {
        self.state.has_user()
    }

    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn dispatch(&mut self, action: SessionAction) -> Vec<Effect> {
        tracing::debug!(?action, "session dispatch");
        reduce(&mut self.state, action)
    }

    /// Create an account through the gateway.
    pub async fn register(&mut self, gateway: &dyn AuthGateway, user: &NewUser) -> Dispatch {
        let mut effects = self.dispatch(SessionAction::RegisterPending);
        let result = gateway.sign_up(user).await;
        let action = match &result {
            Ok(principal) => SessionAction::RegisterFulfilled(principal.clone()),
            Err(e) => {
                tracing::warn!(error = %e, "registration failed");
                SessionAction::RegisterRejected(e.user_message())
            }
        };
        effects.extend(self.dispatch(action));
        Dispatch { result, effects }
    }

    /// Sign in through the gateway.
    pub async fn login(&mut self, gateway: &dyn AuthGateway, credentials: &Credentials) -> Dispatch {
        let mut effects = self.dispatch(SessionAction::LoginPending);
        let result = gateway.sign_in(credentials).await;
        let action = match &result {
            Ok(principal) => SessionAction::LoginFulfilled(principal.clone()),
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                SessionAction::LoginRejected
            }
        };
        effects.extend(self.dispatch(action));
        Dispatch { result, effects }
    }

    pub fn logout(&mut self) {
        self.dispatch(SessionAction::Logout);
    }
}

//! Basic credential strategy backed by the upstream identity API.
//!
//! One invocation validates one username/password pair by calling
//! `POST {API_URL}/api/auth/sign-in` with HTTP Basic credentials and the shared
//! `apiKeyToken`. Outcomes:
//! - 200 with a non-empty payload: the principal (plus session token, if sent)
//! - any other status, or an empty payload: [`StrategyError::Unauthorized`]
//! - transport failure or an unexpected payload: [`StrategyError::Upstream`]

use catalog::Principal;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("identity service error: {0}")]
    Upstream(String),
}

/// A successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub user: Principal,
    /// Upstream session token, forwarded to the browser as an http-only cookie.
    pub token: Option<String>,
}

/// Pluggable credential check. Enables mocking in route tests.
#[async_trait::async_trait]
pub trait CredentialStrategy: Send + Sync {
    /// Validate one username/password pair.
    ///
    /// # Errors
    ///
    /// [`StrategyError::Unauthorized`] when the identity service refuses the
    /// credentials, [`StrategyError::Upstream`] for every other failure.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Grant, StrategyError>;
}

// =============================================================================
// HTTP STRATEGY
// =============================================================================

pub struct BasicStrategy {
    http: reqwest::Client,
    api_url: String,
    api_key_token: String,
}

impl BasicStrategy {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_url: &str, api_key_token: &str) -> Result<Self, StrategyError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| StrategyError::Upstream(e.to_string()))?;
        Ok(Self { http, api_url: api_url.trim_end_matches('/').to_owned(), api_key_token: api_key_token.to_owned() })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    api_key_token: &'a str,
}

#[async_trait::async_trait]
impl CredentialStrategy for BasicStrategy {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Grant, StrategyError> {
        let response = self
            .http
            .post(format!("{}/api/auth/sign-in", self.api_url))
            .basic_auth(username, Some(password))
            .json(&SignInRequest { api_key_token: &self.api_key_token })
            .send()
            .await
            .map_err(|e| StrategyError::Upstream(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| StrategyError::Upstream(e.to_string()))?;
        classify_sign_in(status, &body)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Upstream sign-in payloads come either wrapped with a token or as a bare principal.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignInPayload {
    Wrapped {
        #[serde(default)]
        token: Option<String>,
        user: Principal,
    },
    Bare(Principal),
}

/// Interpret an upstream sign-in response.
pub(crate) fn classify_sign_in(status: u16, body: &str) -> Result<Grant, StrategyError> {
    let trimmed = body.trim();
    if status != 200 || trimmed.is_empty() || trimmed == "null" {
        return Err(StrategyError::Unauthorized);
    }

    let payload: SignInPayload = serde_json::from_str(trimmed)
        .map_err(|e| StrategyError::Upstream(format!("unexpected sign-in payload: {e}")))?;
    let grant = match payload {
        SignInPayload::Wrapped { token, user } => Grant { user, token },
        SignInPayload::Bare(user) => Grant { user, token: None },
    };
    // Principal fields default, so any object parses; an id is what makes it a user.
    if grant.user.id.trim().is_empty() {
        return Err(StrategyError::Upstream("unexpected sign-in payload: principal has no id".into()));
    }
    Ok(grant)
}

#[cfg(test)]
#[path = "strategy_test.rs"]
mod tests;

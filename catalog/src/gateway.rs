//! Auth gateway: HTTP client for the `/auth/sign-up` and `/auth/sign-in` endpoints.
//!
//! Each call is a single request: no retries, no timeout override. Failures
//! carry the upstream `message` field when the response body has one so the
//! session container can surface it verbatim.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::types::Principal;

// =============================================================================
// REQUEST PAYLOADS
// =============================================================================

/// Registration payload submitted to `/auth/sign-up`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login credentials. `email`/`password` travel as HTTP Basic auth,
/// `remember_me` as the JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInBody {
    remember_me: bool,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (connect, DNS, I/O).
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-2xx status.
    #[error("request rejected: status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// A 2xx response body was not a principal.
    #[error("response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GatewayError {
    /// Message suitable for showing to the user: the upstream `message` when
    /// one was returned, otherwise the error's own description.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message: Some(message), .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Identity endpoints used by the session container. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport failure or non-2xx status.
    async fn sign_up(&self, user: &NewUser) -> Result<Principal, GatewayError>;

    /// Authenticate with Basic credentials.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport failure or non-2xx status.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Principal, GatewayError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpAuthGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    /// Build a gateway rooted at `base_url` (e.g. `http://127.0.0.1:3000`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn finish(response: reqwest::Response) -> Result<Principal, GatewayError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        read_principal(status, &body)
    }
}

#[async_trait::async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn sign_up(&self, user: &NewUser) -> Result<Principal, GatewayError> {
        let response = self
            .http
            .post(self.endpoint("/auth/sign-up"))
            .json(user)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Self::finish(response).await
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Principal, GatewayError> {
        let response = self
            .http
            .post(self.endpoint("/auth/sign-in"))
            .basic_auth(&credentials.email, Some(&credentials.password))
            .json(&SignInBody { remember_me: credentials.remember_me })
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Self::finish(response).await
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// Interpret a gateway response.
pub(crate) fn read_principal(status: u16, body: &str) -> Result<Principal, GatewayError> {
    if !(200..300).contains(&status) {
        let message = upstream_message(body);
        tracing::debug!(status, message = message.as_deref().unwrap_or(""), "auth gateway rejected request");
        return Err(GatewayError::Rejected { status, message });
    }
    serde_json::from_str(body).map_err(|e| GatewayError::Parse(e.to_string()))
}

/// Extract the `message` field from a JSON error body, if there is one.
pub(crate) fn upstream_message(body: &str) -> Option<String> {
    serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.is_empty())
}

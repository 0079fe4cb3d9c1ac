//! Sign-up proxy to the upstream identity API.

use catalog::{NewUser, Principal};
use serde::Deserialize;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// The identity service refused the registration.
    #[error("registration rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("identity service error: {0}")]
    Upstream(String),
}

#[async_trait::async_trait]
pub trait Registrar: Send + Sync {
    /// Create an account upstream.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] on refusal or transport failure.
    async fn register(&self, user: &NewUser) -> Result<Principal, RegistrationError>;
}

pub struct UpstreamRegistrar {
    http: reqwest::Client,
    api_url: String,
}

impl UpstreamRegistrar {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_url: &str) -> Result<Self, RegistrationError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| RegistrationError::Upstream(e.to_string()))?;
        Ok(Self { http, api_url: api_url.trim_end_matches('/').to_owned() })
    }
}

#[async_trait::async_trait]
impl Registrar for UpstreamRegistrar {
    async fn register(&self, user: &NewUser) -> Result<Principal, RegistrationError> {
        let response = self
            .http
            .post(format!("{}/api/auth/sign-up", self.api_url))
            .json(user)
            .send()
            .await
            .map_err(|e| RegistrationError::Upstream(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RegistrationError::Upstream(e.to_string()))?;
        read_registration(status, &body, user)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SignUpResponse {
    id: Option<String>,
    /// Some identity services answer `{"data": "<id>", "message": "user created"}`.
    data: Option<serde_json::Value>,
    message: Option<String>,
}

/// Build the principal for a registration response. Name and email echo the
/// submitted user; the id comes from whichever field the service used.
pub(crate) fn read_registration(status: u16, body: &str, user: &NewUser) -> Result<Principal, RegistrationError> {
    let parsed: SignUpResponse = serde_json::from_str(body).unwrap_or_default();

    if !(200..300).contains(&status) {
        let message = parsed
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("sign-up failed with status {status}"));
        return Err(RegistrationError::Rejected { status, message });
    }

    let id = parsed
        .id
        .or_else(|| match parsed.data {
            Some(serde_json::Value::String(id)) => Some(id),
            _ => None,
        })
        .unwrap_or_default();
    Ok(Principal { id, name: user.name.clone(), email: user.email.clone() })
}

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;

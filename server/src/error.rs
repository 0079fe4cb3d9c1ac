//! HTTP error responses for the auth and API routes.
//!
//! Errors render as boom-style JSON bodies:
//! `{"statusCode": 401, "error": "Unauthorized", "message": "Unauthorized"}`.
//! Session clients read the `message` field to show upstream failures verbatim.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::services::signup::RegistrationError;
use crate::services::strategy::StrategyError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Credentials missing or refused by the identity service.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    /// The identity service refused a request; status and message are forwarded.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// The identity service could not be reached or answered nonsense.
    #[error("{0}")]
    BadGateway(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoomBody {
    pub status_code: u16,
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = BoomBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown"),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StrategyError> for ApiError {
    fn from(err: StrategyError) -> Self {
        match err {
            StrategyError::Unauthorized => Self::Unauthorized,
            StrategyError::Upstream(message) => Self::BadGateway(message),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Rejected { status, message } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                Self::Upstream { status, message }
            }
            RegistrationError::Upstream(message) => Self::BadGateway(message),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

//! Auth routes: Basic sign-in, sign-up proxy, sign-out.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Json, Redirect};
use axum_extra::TypedHeader;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;
use catalog::session::SESSION_COOKIES;
use catalog::{NewUser, Principal};
use serde::Deserialize;
use time::Duration;

use crate::error::ApiError;
use crate::state::AppState;

const TOKEN_COOKIE_NAME: &str = "token";

pub(crate) const REMEMBER_ME_MAX_AGE: Duration = Duration::days(30);
pub(crate) const SESSION_MAX_AGE: Duration = Duration::hours(2);

/// Secure cookies only when serving production traffic.
pub(crate) fn cookie_secure(state: &AppState) -> bool {
    state.config.mode.is_production()
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SignInOptions {
    pub remember_me: bool,
}

/// Parse the optional `{"rememberMe": bool}` body. An empty body means defaults.
pub(crate) fn parse_sign_in_options(body: &[u8]) -> Result<SignInOptions, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SignInOptions::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid sign-in body: {e}")))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /auth/sign-in`: validate Basic credentials upstream, set the session token cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    body: Bytes,
) -> Result<(CookieJar, Json<Principal>), ApiError> {
    let Some(TypedHeader(Authorization(basic))) = credentials else {
        return Err(ApiError::Unauthorized);
    };
    let options = parse_sign_in_options(&body)?;

    let grant = match state.strategy.authenticate(basic.username(), basic.password()).await {
        Ok(grant) => grant,
        Err(e) => {
            tracing::warn!(error = %e, "sign-in refused");
            return Err(e.into());
        }
    };
    tracing::info!(user_id = %grant.user.id, remember_me = options.remember_me, "user signed in");

    let jar = match grant.token {
        Some(token) => {
            let max_age = if options.remember_me { REMEMBER_ME_MAX_AGE } else { SESSION_MAX_AGE };
            let cookie = Cookie::build((TOKEN_COOKIE_NAME, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(cookie_secure(&state))
                .max_age(max_age);
            jar.add(cookie)
        }
        None => jar,
    };

    Ok((jar, Json(grant.user)))
}

/// `POST /auth/sign-up`: forward a registration to the identity service.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<Principal>), ApiError> {
    if user.name.trim().is_empty() || user.email.trim().is_empty() || user.password.is_empty() {
        return Err(ApiError::BadRequest("name, email and password are required".into()));
    }

    match state.registrar.register(&user).await {
        Ok(principal) => {
            tracing::info!(email = %principal.email, "user registered");
            Ok((StatusCode::CREATED, Json(principal)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "registration failed");
            Err(e.into())
        }
    }
}

/// `POST /auth/sign-out`: expire every session cookie and send the browser to `/login`.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let secure = cookie_secure(&state);
    let jar = SESSION_COOKIES.into_iter().fold(jar, |jar, name| {
        let cookie = Cookie::build((name, ""))
            .path("/")
            .http_only(name == TOKEN_COOKIE_NAME)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(Duration::ZERO);
        jar.add(cookie)
    });
    (jar, Redirect::to("/login"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the auth and movie API routes, the static asset
//! directory, and the SSR fallback under a single Axum router. Any GET that no
//! API route claims is rendered by [`render::render_app`].

pub mod auth;
pub mod movies;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::render;
use crate::state::AppState;

/// JSON API routes.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/api/movies", get(movies::list_movies))
        .route("/healthz", get(healthz))
}

/// Full application: API routes + `/assets` static files + SSR for everything else.
pub fn app(state: AppState) -> Router {
    let assets_dir = state.config.public_dir.join("assets");

    api_routes()
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(get(render::render_app))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

//! Server-side rendering of catalog pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every GET that no API route claims lands in [`render_app`]. Each request
//! builds its own [`RenderContext`] from a clone of the startup seed, so
//! concurrent renders never share state and no live session leaks into a page.
//!
//! ERROR HANDLING
//! ==============
//! A failed render is logged and answered with a 500 carrying
//! [`document::fallback_document`].

pub mod assets;
pub mod document;
pub mod view;

use std::path::Path;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use catalog::CatalogState;

use crate::state::AppState;
use assets::AssetPaths;
use view::Page;

const BUILTIN_SEED: &str = include_str!("../../seed/initial_state.json");

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("state snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read initial state {path}: {source}")]
    Read { path: String, source: std::io::Error },

    #[error("malformed initial state: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the static initial state: `path` when given, the built-in seed otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_seed(path: Option<&Path>) -> Result<CatalogState, SeedError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|source| SeedError::Read { path: path.display().to_string(), source })?,
        None => BUILTIN_SEED.to_owned(),
    };
    Ok(serde_json::from_str(&raw)?)
}

// =============================================================================
// RENDER CONTEXT
// =============================================================================

/// Output of one render.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: StatusCode,
    pub markup: String,
    pub snapshot: String,
    pub document: String,
}

/// Request-scoped state container plus the path being rendered.
pub struct RenderContext {
    state: CatalogState,
    page: Page,
}

impl RenderContext {
    /// Seed a fresh container for `path`. The seed itself is never mutated.
    #[must_use]
    pub fn new(seed: &CatalogState, path: &str) -> Self {
        let mut state = seed.clone();
        let page = Page::from_path(path);
        if let Page::Player(id) = &page {
            state.select_playing(id);
        }
        Self { state, page }
    }

    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Render markup, snapshot the state, and wrap both in a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the state snapshot fails to serialize.
    pub fn render(self, assets: &AssetPaths) -> Result<RenderedPage, RenderError> {
        let markup = view::render_markup(&self.state, &self.page);
        let snapshot = document::serialize_state(&self.state)?;
        let document = document::html_document(&markup, &snapshot, assets);

        let found = match &self.page {
            Page::NotFound => false,
            Page::Player(_) => self.state.playing.is_some(),
            Page::Home | Page::Login | Page::Register => true,
        };
        let status = if found { StatusCode::OK } else { StatusCode::NOT_FOUND };

        Ok(RenderedPage { status, markup, snapshot, document })
    }
}

// =============================================================================
// HANDLER
// =============================================================================

/// Fallback `GET` handler: render the page for the request path.
pub async fn render_app(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    respond(path, RenderContext::new(&state.seed, path).render(&state.assets))
}

/// Turn a render outcome into a response; failures get the static fallback page.
fn respond(path: &str, rendered: Result<RenderedPage, RenderError>) -> Response {
    match rendered {
        Ok(page) => {
            tracing::debug!(%path, status = %page.status, "page rendered");
            (page.status, Html(page.document)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, %path, "page render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(document::fallback_document())).into_response()
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

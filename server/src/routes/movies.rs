//! Movie list route.

use axum::extract::State;
use axum::response::Json;
use catalog::MovieLists;

use crate::state::AppState;

/// `GET /api/movies`: the browsable lists from the initial catalog state.
pub async fn list_movies(State(state): State<AppState>) -> Json<MovieLists> {
    Json(state.seed.movie_lists())
}

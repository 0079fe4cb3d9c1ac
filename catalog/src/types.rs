//! Catalog data model shared by the rendering server and session clients.
//!
//! `CatalogState` is the full application state that the server seeds into
//! every rendered page and serializes as the hydration snapshot. Field names
//! are camelCase on the wire.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::session::SessionState;

// =============================================================================
// PRINCIPAL
// =============================================================================

/// Identity record returned by the identity service on sign-in/sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub email: String,
}

// =============================================================================
// MOVIES
// =============================================================================

/// A single catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub language: String,
    pub year: u16,
    pub content_rating: String,
    /// Runtime in minutes.
    pub duration: u32,
    pub cover: String,
    pub description: String,
    pub source: String,
}

/// The three browsable lists, as served by `GET /api/movies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieLists {
    pub my_list: Vec<Movie>,
    pub trends: Vec<Movie>,
    pub originals: Vec<Movie>,
}

impl MovieLists {
    /// Total number of entries across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.my_list.len() + self.trends.len() + self.originals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// CATALOG STATE
// =============================================================================

/// Full application state embedded into rendered pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogState {
    pub user: SessionState,
    pub playing: Option<Movie>,
    pub my_list: Vec<Movie>,
    pub trends: Vec<Movie>,
    pub originals: Vec<Movie>,
    pub search_result: Vec<Movie>,
}

impl CatalogState {
    /// Look up a movie by id across `myList`, `trends` and `originals`, in that order.
    #[must_use]
    pub fn find_movie(&self, id: &str) -> Option<&Movie> {
        self.my_list
            .iter()
            .chain(&self.trends)
            .chain(&self.originals)
            .find(|movie| movie.id == id)
    }

    /// Set `playing` to the movie with `id`. Returns whether one was found;
    /// when none is, `playing` is cleared.
    pub fn select_playing(&mut self, id: &str) -> bool {
        self.playing = self.find_movie(id).cloned();
        self.playing.is_some()
    }

    /// Clone the browsable lists out of the state.
    #[must_use]
    pub fn movie_lists(&self) -> MovieLists {
        MovieLists { my_list: self.my_list.clone(), trends: self.trends.clone(), originals: self.originals.clone() }
    }
}

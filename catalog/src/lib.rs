//! Shared movie-catalog domain model, session container and auth gateway.
//!
//! This crate owns the types used by both `server` and `cli`: the catalog
//! state that gets embedded into rendered pages, the session state container
//! that tracks the signed-in user, and the HTTP gateway that talks to the
//! `/auth/*` endpoints.

pub mod gateway;
pub mod session;
pub mod types;

pub use gateway::{AuthGateway, Credentials, GatewayError, HttpAuthGateway, NewUser};
pub use session::{Dispatch, Effect, Notification, SessionAction, SessionState, SessionStore};
pub use types::{CatalogState, Movie, MovieLists, Principal};

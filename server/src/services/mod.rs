//! Upstream identity services used by the auth routes.
//!
//! ARCHITECTURE
//! ============
//! Each service sits behind an `async_trait` seam so route handlers can be
//! exercised with mocks. Handlers stay focused on HTTP translation and cookies.

pub mod signup;
pub mod strategy;

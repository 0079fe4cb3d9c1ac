//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! built once at startup and never mutated afterwards: configuration, the
//! identity service seams, resolved asset paths, and the initial catalog
//! state that every render clones.

use std::sync::Arc;

use catalog::CatalogState;

use crate::config::ServerConfig;
use crate::render::assets::AssetPaths;
use crate::services::signup::Registrar;
use crate::services::strategy::CredentialStrategy;

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub strategy: Arc<dyn CredentialStrategy>,
    pub registrar: Arc<dyn Registrar>,
    pub assets: Arc<AssetPaths>,
    pub seed: Arc<CatalogState>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: ServerConfig,
        strategy: Arc<dyn CredentialStrategy>,
        registrar: Arc<dyn Registrar>,
        assets: AssetPaths,
        seed: CatalogState,
    ) -> Self {
        Self { config: Arc::new(config), strategy, registrar, assets: Arc::new(assets), seed: Arc::new(seed) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

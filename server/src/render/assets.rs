//! Stylesheet/script selection for rendered pages.
//!
//! Development serves fixed bundle names. Production resolves content-hashed
//! names from `manifest.json` in the public directory, read once at startup.

use std::collections::HashMap;
use std::path::Path;

use crate::config::RunMode;

pub const DEV_STYLESHEET: &str = "/assets/app.css";
pub const DEV_SCRIPT: &str = "/assets/app.js";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read asset manifest: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed asset manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("asset manifest has no `{0}` entry")]
    MissingEntry(&'static str),
}

/// Asset URLs referenced by every rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub stylesheet: String,
    pub script: String,
    /// Split vendor bundle, production only.
    pub vendors: Option<String>,
}

impl AssetPaths {
    #[must_use]
    pub fn development() -> Self {
        Self { stylesheet: DEV_STYLESHEET.to_owned(), script: DEV_SCRIPT.to_owned(), vendors: None }
    }

    /// Resolve bundle names from a parsed manifest.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::MissingEntry`] if `main.css` or `main.js` is absent.
    pub fn from_manifest(manifest: &HashMap<String, String>) -> Result<Self, AssetError> {
        let entry = |key: &'static str| manifest.get(key).map(String::as_str).map(absolute);
        Ok(Self {
            stylesheet: entry("main.css").ok_or(AssetError::MissingEntry("main.css"))?,
            script: entry("main.js").ok_or(AssetError::MissingEntry("main.js"))?,
            vendors: entry("vendors.js"),
        })
    }

    /// Read `manifest.json` from `public_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, malformed, or incomplete.
    pub fn read_manifest(public_dir: &Path) -> Result<Self, AssetError> {
        let raw = std::fs::read_to_string(public_dir.join(MANIFEST_FILE))?;
        let manifest: HashMap<String, String> = serde_json::from_str(&raw)?;
        Self::from_manifest(&manifest)
    }

    /// Pick asset paths for `mode`. A production manifest that cannot be used
    /// falls back to the development names.
    #[must_use]
    pub fn select(mode: RunMode, public_dir: &Path) -> Self {
        if !mode.is_production() {
            return Self::development();
        }
        match Self::read_manifest(public_dir) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!(error = %e, dir = %public_dir.display(), "asset manifest unusable; using development asset paths");
                Self::development()
            }
        }
    }
}

fn absolute(path: &str) -> String {
    if path.starts_with('/') || path.contains("://") {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
#[path = "assets_test.rs"]
mod tests;

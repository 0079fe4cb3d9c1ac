//! Server configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` before calling [`ServerConfig::from_env`].
//! Parsing goes through a lookup function so tests never touch the process
//! environment.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Selects asset-serving behavior and cookie hardening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub mode: RunMode,
    pub port: u16,
    /// Upstream identity API base URL, without trailing slash.
    pub api_url: String,
    /// Pre-shared key sent with every upstream sign-in.
    pub api_key_token: String,
    /// Directory holding bundled assets and `manifest.json`.
    pub public_dir: PathBuf,
    /// Optional JSON file replacing the built-in initial state.
    pub initial_state_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `API_URL`
    /// - `API_KEY_TOKEN`
    ///
    /// Optional:
    /// - `ENV`: `development` (default) or `production`
    /// - `PORT`: default 3000
    /// - `PUBLIC_DIR`: default `public`
    /// - `INITIAL_STATE_PATH`: seed override
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = parse_mode(lookup("ENV").as_deref())?;
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let api_url = required(&lookup, "API_URL")?.trim_end_matches('/').to_owned();
        let api_key_token = required(&lookup, "API_KEY_TOKEN")?;

        let public_dir = lookup("PUBLIC_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR), PathBuf::from);
        let initial_state_path = lookup("INITIAL_STATE_PATH")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { mode, port, api_url, api_key_token, public_dir, initial_state_path })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar(var))
}

fn parse_mode(raw: Option<&str>) -> Result<RunMode, ConfigError> {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        None | Some("" | "development" | "dev") => Ok(RunMode::Development),
        Some("production" | "prod") => Ok(RunMode::Production),
        Some(other) => Err(ConfigError::InvalidValue { var: "ENV", value: other.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

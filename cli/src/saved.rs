//! Session state persisted between CLI invocations.
//!
//! The browser keeps the session in a store plus `document.cookie`; the CLI
//! keeps the same pair in one JSON file and replays reducer effects against it.

use std::collections::BTreeMap;
use std::path::Path;

use catalog::session::NotificationLevel;
use catalog::{Effect, Notification, SessionState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedSession {
    pub session: SessionState,
    pub cookies: BTreeMap<String, String>,
}

/// What the caller still has to do after the cookie jar absorbed the effects.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Applied {
    pub notifications: Vec<Notification>,
    pub refresh_movies: bool,
}

impl SavedSession {
    /// Read the session file. A missing file is an empty session.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, crate::CliError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(crate::CliError::SessionFile { path: path.display().to_string(), source: e }),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), crate::CliError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .map_err(|source| crate::CliError::SessionFile { path: path.display().to_string(), source })
    }

    /// Apply cookie effects in order; an empty value deletes the cookie.
    pub fn apply(&mut self, effects: Vec<Effect>) -> Applied {
        let mut applied = Applied::default();
        for effect in effects {
            match effect {
                Effect::Notify(notification) => applied.notifications.push(notification),
                Effect::SetCookie { name, value } if value.is_empty() => {
                    self.cookies.remove(name);
                }
                Effect::SetCookie { name, value } => {
                    self.cookies.insert(name.to_owned(), value);
                }
                Effect::RefreshMovies => applied.refresh_movies = true,
            }
        }
        applied
    }
}

/// One-line rendering of a notification for the terminal.
#[must_use]
pub fn notification_line(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    format!("[{tag}] {}", notification.message)
}

#[cfg(test)]
#[path = "saved_test.rs"]
mod tests;

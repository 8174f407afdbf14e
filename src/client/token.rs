//! Auth Token Lookup
//!
//! The bearer token is looked up on every request, never cached, so a
//! `login`/`logout` between two calls takes effect immediately.

use std::path::{Path, PathBuf};

/// Source of the bearer token attached to API requests
pub trait TokenSource: Send + Sync {
    /// Current token, or `None` to send the request unauthenticated
    fn token(&self) -> Option<String>;
}

/// Token persisted in a single file (the native stand-in for browser local storage)
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a token, creating the parent directory if needed
    pub fn save(&self, token: &str) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, token.trim()).map_err(|e| self.io_error(e))?;
        tracing::info!(path = ?self.path, "Stored auth token");
        Ok(())
    }

    /// Remove the stored token. Clearing an absent token is not an error.
    pub fn clear(&self) -> Result<(), TokenError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = ?self.path, "Removed auth token");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, error: std::io::Error) -> TokenError {
        TokenError::Io {
            path: self.path.clone(),
            error: error.to_string(),
        }
    }
}

impl TokenSource for FileTokenStore {
    fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

/// Fixed token, e.g. from `COMMUNITY_HUB_TOKEN`
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone().filter(|t| !t.trim().is_empty())
    }
}

/// Token store errors
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to access token file {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}

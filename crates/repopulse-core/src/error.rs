//! Error types for repopulse-core
//!
//! Widgets never surface these to the user: a failed fetch degrades to an
//! empty widget. They exist so the failure can be logged precisely.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the core crate
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for repopulse operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Input Errors
    // ===================
    #[error("Invalid repository id '{input}': expected owner/name")]
    InvalidRepoId { input: String },

    #[error("Invalid date '{input}'")]
    InvalidDate { input: String },

    // ===================
    // Fetch Errors
    // ===================
    #[error("Network error while fetching {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    // ===================
    // Settings Errors
    // ===================
    #[error("Failed to read settings: {path}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings in {path}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Surface Errors
    // ===================
    #[error("Rendering surface already disposed")]
    SurfaceDisposed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether the error came from the remote data source
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            CoreError::Network { .. } | CoreError::HttpStatus { .. } | CoreError::Parse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_classification() {
        let status = CoreError::HttpStatus {
            url: "https://example.test/a/b/meta.json".to_string(),
            status: 404,
        };
        assert!(status.is_fetch_error());
        assert_eq!(
            status.to_string(),
            "HTTP 404 from https://example.test/a/b/meta.json"
        );

        let invalid = CoreError::InvalidRepoId {
            input: "nope".to_string(),
        };
        assert!(!invalid.is_fetch_error());
        assert!(invalid.to_string().contains("owner/name"));
    }
}

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Problems with the configuration supplied through the environment.
///
/// These are detected before any network call is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid redirect URI {uri}: {reason}")]
    InvalidRedirectUri { uri: String, reason: String },

    /// The username names the token cache file and must not contain a path.
    #[error("Invalid {var} {value:?}: path separators are not allowed")]
    InvalidUsername { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The accounts service answered with an OAuth error body.
    #[error("Spotify rejected the token request: {error} ({description})")]
    Rejected { error: String, description: String },

    #[error("Unexpected token response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Authorization callback server failed: {0}")]
    Server(String),

    #[error("Authorization failed or timed out after {0} seconds")]
    Timeout(u64),

    #[error("Token cache error: {0}")]
    Cache(#[from] StorageError),
}

/// Failure of a single statistics request.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: StatusCode },

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to write snapshot: {0}")]
    Storage(#[from] StorageError),
}

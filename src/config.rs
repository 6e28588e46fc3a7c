//! Configuration management for the Spotify snapshot fetcher.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files and turns them into an explicit [`Config`] value that is
//! passed to everything that needs it. Nothing reads the environment after
//! [`Config::from_env`] has run.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::errors::ConfigError;

/// Name of the application directory below the platform data directory.
pub const APP_DIR: &str = "spotify-snapshot";

/// Read-only permissions requested for every authorization.
pub const SPOTIFY_SCOPE: &str = "user-top-read user-read-recently-played";

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_OUTPUT_PATH: &str = "../src/data/spotify-data.json";

pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";
pub const ENV_USERNAME: &str = "SPOTIFY_USERNAME";
pub const ENV_REFRESH_TOKEN: &str = "SPOTIFY_REFRESH_TOKEN";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_AUTH_URL: &str = "SPOTIFY_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_TOKEN_URL";
pub const ENV_OUTPUT_PATH: &str = "SPOTIFY_DATA_OUTPUT";

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the current working directory first and then in
/// the platform-specific local data directory under `spotify-snapshot/.env`.
/// Variables that are already set in the process environment are never
/// overwritten, so secrets injected by a CI runner always win.
///
/// # Directory Structure
///
/// The data directory file is looked up in:
/// - Linux: `~/.local/share/spotify-snapshot/.env`
/// - macOS: `~/Library/Application Support/spotify-snapshot/.env`
/// - Windows: `%LOCALAPPDATA%/spotify-snapshot/.env`
///
/// Missing files are silently skipped: unattended runs usually get all of their
/// configuration from the environment.
pub fn load_env() {
    dotenv::dotenv().ok();
    dotenv::from_path(data_dir().join(".env")).ok();
}

/// Returns the application directory inside the platform data directory.
///
/// Falls back to the current directory when the platform does not expose one.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// How the run obtains its access credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Browser based authorization with a local token cache.
    Interactive,
    /// Exchange of a pre-issued refresh token, no user interaction.
    RefreshToken,
}

/// Runtime configuration of a snapshot run.
///
/// Credentials are kept optional here; each credential resolver validates the
/// subset it needs through [`Config::interactive_credentials`] or
/// [`Config::refresh_credentials`].
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub username: Option<String>,
    pub refresh_token: Option<String>,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub output_path: PathBuf,
}

/// Credentials required by the interactive authorization flow.
#[derive(Debug, Clone)]
pub struct InteractiveCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub username: String,
}

/// Credentials required by the refresh token flow.
#[derive(Debug, Clone)]
pub struct RefreshCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Example
    ///
    /// ```
    /// use spotify_snapshot::config::{self, Config};
    ///
    /// config::load_env();
    /// let config = Config::from_env();
    /// println!("Writing to {}", config.output_path.display());
    /// ```
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as absent. Used by [`Config::from_env`] and by
    /// tests that must not touch the real process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            client_id: get(ENV_CLIENT_ID),
            client_secret: get(ENV_CLIENT_SECRET),
            redirect_uri: get(ENV_REDIRECT_URI).unwrap_or_else(|| DEFAULT_REDIRECT_URI.into()),
            username: get(ENV_USERNAME),
            refresh_token: get(ENV_REFRESH_TOKEN),
            api_url: get(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.into()),
            auth_url: get(ENV_AUTH_URL).unwrap_or_else(|| DEFAULT_AUTH_URL.into()),
            token_url: get(ENV_TOKEN_URL).unwrap_or_else(|| DEFAULT_TOKEN_URL.into()),
            output_path: get(ENV_OUTPUT_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        }
    }

    /// Selects the credential flow for this run.
    ///
    /// A configured refresh token means the run is unattended (for example a
    /// scheduled CI job); otherwise the interactive flow is used.
    pub fn auth_mode(&self) -> AuthMode {
        if self.refresh_token.is_some() {
            AuthMode::RefreshToken
        } else {
            AuthMode::Interactive
        }
    }

    /// Returns the credentials of the interactive flow.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming every absent variable, and
    /// [`ConfigError::InvalidUsername`] when the username contains a path
    /// separator.
    pub fn interactive_credentials(&self) -> Result<InteractiveCredentials, ConfigError> {
        let missing = missing_vars(&[
            (ENV_CLIENT_ID, &self.client_id),
            (ENV_CLIENT_SECRET, &self.client_secret),
            (ENV_USERNAME, &self.username),
        ]);
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let username = self.username.clone().unwrap_or_default();
        if username.contains(['/', '\\', '\0']) {
            return Err(ConfigError::InvalidUsername {
                var: ENV_USERNAME,
                value: username,
            });
        }

        Ok(InteractiveCredentials {
            client_id: self.client_id.clone().unwrap_or_default(),
            client_secret: self.client_secret.clone().unwrap_or_default(),
            redirect_uri: self.redirect_uri.clone(),
            username,
        })
    }

    /// Returns the credentials of the refresh token flow.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming every absent variable.
    pub fn refresh_credentials(&self) -> Result<RefreshCredentials, ConfigError> {
        let missing = missing_vars(&[
            (ENV_CLIENT_ID, &self.client_id),
            (ENV_CLIENT_SECRET, &self.client_secret),
            (ENV_REFRESH_TOKEN, &self.refresh_token),
        ]);
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(RefreshCredentials {
            client_id: self.client_id.clone().unwrap_or_default(),
            client_secret: self.client_secret.clone().unwrap_or_default(),
            refresh_token: self.refresh_token.clone().unwrap_or_default(),
        })
    }
}

fn missing_vars(vars: &[(&'static str, &Option<String>)]) -> Vec<&'static str> {
    vars.iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect()
}

use std::path::PathBuf;

use crate::{
    config,
    errors::{AuthError, StorageError},
    spotify::auth::OAuthClient,
    types::Token,
    utils,
};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN: u64 = 240;

/// Cached OAuth token of the interactive flow, one file per Spotify user.
pub struct TokenManager {
    username: String,
    token: Token,
}

impl TokenManager {
    pub fn new(username: &str, token: Token) -> Self {
        TokenManager {
            username: username.to_string(),
            token,
        }
    }

    pub async fn load(username: &str) -> Result<Self, StorageError> {
        let path = Self::token_path(username);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self {
            username: username.to_string(),
            token,
        })
    }

    pub async fn persist(&self) -> Result<(), StorageError> {
        let path = Self::token_path(&self.username);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }

    /// Returns a usable token, refreshing and re-persisting it when expired.
    pub async fn get_valid_token(&mut self, oauth: &OAuthClient) -> Result<Token, AuthError> {
        if self.is_expired() {
            self.token = oauth.refresh(&self.token.refresh_token).await?;
            self.persist().await?;
        }

        Ok(self.token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = utils::current_unix_time();
        now + EXPIRY_MARGIN >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path(username: &str) -> PathBuf {
        let mut path = config::data_dir();
        path.push(format!("cache/token-{username}.json"));
        path
    }
}

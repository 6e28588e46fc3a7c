use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use reqwest::{Client, Url, header::AUTHORIZATION};
use tokio::sync::Mutex;

use crate::{
    config::{self, Config},
    errors::{AuthError, ConfigError},
    info,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{AuthSession, Token, TokenErrorResponse, TokenResponse},
    utils::{self, CallbackAddress},
    warning,
};

/// How long the interactive flow waits for the browser to come back.
pub const AUTH_TIMEOUT_SECS: u64 = 120;

/// Strategy that produces an access credential for the Web API.
///
/// The snapshot pipeline is generic over this trait, so the interactive and
/// the unattended variants share everything after authentication.
#[allow(async_fn_in_trait)]
pub trait CredentialResolver {
    async fn access_token(&self) -> Result<Token, AuthError>;
}

/// Client for the Spotify accounts service (authorize and token endpoints).
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
}

impl OAuthClient {
    pub fn new(http: Client, config: &Config, client_id: &str, client_secret: &str) -> Self {
        Self {
            http,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: config.redirect_uri.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
        }
    }

    /// Builds the URL the user has to open to grant access.
    pub fn authorize_url(&self, state: &str) -> Result<Url, AuthError> {
        let mut url = Url::parse(&self.auth_url).map_err(|e| AuthError::InvalidEndpoint {
            url: self.auth_url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", config::SPOTIFY_SCOPE)
            .append_pair("state", state);
        Ok(url)
    }

    /// Exchanges an authorization code received on the callback for a token.
    pub async fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        self.request_token(
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ],
            None,
        )
        .await
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// Spotify does not always rotate the refresh token; when the response
    /// carries none, the one passed in is kept.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token, AuthError> {
        self.request_token(
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ],
            Some(refresh_token),
        )
        .await
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        previous_refresh_token: Option<&str>,
    ) -> Result<Token, AuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => AuthError::Rejected {
                    error: err.error,
                    description: err.error_description.unwrap_or_default(),
                },
                Err(_) => AuthError::Rejected {
                    error: status.to_string(),
                    description: body,
                },
            });
        }

        let json: TokenResponse = serde_json::from_str(&body)?;

        Ok(Token {
            access_token: json.access_token,
            refresh_token: json
                .refresh_token
                .or_else(|| previous_refresh_token.map(str::to_string))
                .unwrap_or_default(),
            scope: json.scope.unwrap_or_default(),
            expires_in: json.expires_in,
            obtained_at: utils::current_unix_time(),
        })
    }
}

/// Browser based authorization with a per-user token cache.
pub struct InteractiveResolver {
    oauth: OAuthClient,
    username: String,
    callback: CallbackAddress,
}

impl InteractiveResolver {
    /// Validates the interactive credentials without touching the network.
    pub fn new(config: &Config, http: Client) -> Result<Self, ConfigError> {
        let credentials = config.interactive_credentials()?;
        let callback = utils::parse_redirect_uri(&credentials.redirect_uri)?;

        Ok(Self {
            oauth: OAuthClient::new(
                http,
                config,
                &credentials.client_id,
                &credentials.client_secret,
            ),
            username: credentials.username,
            callback,
        })
    }

    /// Runs the full browser flow and caches the resulting token.
    ///
    /// Starts the local callback server on the redirect URI's address, opens
    /// the authorization page and waits up to [`AUTH_TIMEOUT_SECS`] for the
    /// callback to deliver a token.
    pub async fn authorize(&self) -> Result<Token, AuthError> {
        let state = utils::generate_state();
        let session = Arc::new(Mutex::new(AuthSession {
            state: state.clone(),
            token: None,
        }));

        let auth_url = self.oauth.authorize_url(&state)?;

        let server = tokio::spawn(start_api_server(
            self.callback.clone(),
            Arc::clone(&session),
            self.oauth.clone(),
        ));

        if webbrowser::open(auth_url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            )
        }

        let max_wait = Duration::from_secs(AUTH_TIMEOUT_SECS);
        let start = Instant::now();

        let token = loop {
            if let Some(token) = session.lock().await.token.clone() {
                break token;
            }

            if server.is_finished() {
                return Err(match server.await {
                    Ok(Err(e)) => e,
                    Ok(Ok(())) => AuthError::Server("callback server stopped".to_string()),
                    Err(e) => AuthError::Server(e.to_string()),
                });
            }

            if start.elapsed() >= max_wait {
                server.abort();
                return Err(AuthError::Timeout(AUTH_TIMEOUT_SECS));
            }

            tokio::time::sleep(Duration::from_secs(1)).await;
        };
        server.abort();

        TokenManager::new(&self.username, token.clone()).persist().await?;
        success!("Authentication successful!");

        Ok(token)
    }
}

impl CredentialResolver for InteractiveResolver {
    async fn access_token(&self) -> Result<Token, AuthError> {
        match TokenManager::load(&self.username).await {
            Ok(mut token_mgr) => match token_mgr.get_valid_token(&self.oauth).await {
                Ok(token) => return Ok(token),
                Err(e) => warning!("Cached token could not be refreshed. Err: {}", e),
            },
            Err(_) => info!("No cached token for {}, starting authorization...", self.username),
        }

        self.authorize().await
    }
}

/// Unattended authorization from a refresh token supplied out-of-band.
pub struct RefreshTokenResolver {
    oauth: OAuthClient,
    refresh_token: String,
}

impl RefreshTokenResolver {
    /// Validates the refresh token credentials without touching the network.
    pub fn new(config: &Config, http: Client) -> Result<Self, ConfigError> {
        let credentials = config.refresh_credentials()?;

        Ok(Self {
            oauth: OAuthClient::new(
                http,
                config,
                &credentials.client_id,
                &credentials.client_secret,
            ),
            refresh_token: credentials.refresh_token,
        })
    }
}

impl CredentialResolver for RefreshTokenResolver {
    async fn access_token(&self) -> Result<Token, AuthError> {
        self.oauth.refresh(&self.refresh_token).await
    }
}

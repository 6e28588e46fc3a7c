use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    api, errors::AuthError, spotify::auth::OAuthClient, types::AuthSession,
    utils::CallbackAddress,
};

/// Serves the OAuth redirect URI until the surrounding task is aborted.
///
/// Binds to the host and port of the configured redirect URI and routes its
/// path to [`api::callback`].
pub async fn start_api_server(
    address: CallbackAddress,
    session: Arc<Mutex<AuthSession>>,
    oauth: OAuthClient,
) -> Result<(), AuthError> {
    let app = Router::new()
        .route(&address.path, get(api::callback))
        .layer(Extension(session))
        .layer(Extension(oauth));

    let listener = TcpListener::bind((address.host.as_str(), address.port))
        .await
        .map_err(|e| {
            AuthError::Server(format!(
                "cannot listen on {}:{}: {}",
                address.host, address.port, e
            ))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AuthError::Server(e.to_string()))
}

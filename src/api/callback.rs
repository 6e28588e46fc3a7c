use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify::auth::OAuthClient, types::AuthSession, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<AuthSession>>>,
    Extension(oauth): Extension<OAuthClient>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was denied: {}", error);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let expected_state = shared_state.lock().await.state.clone();
    if params.get("state") != Some(&expected_state) {
        warning!("Ignoring callback with unexpected state parameter.");
        return Html("<h4>State mismatch.</h4>");
    }

    // No lock is held across the exchange.
    match oauth.exchange_code(code).await {
        Ok(token) => {
            shared_state.lock().await.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}

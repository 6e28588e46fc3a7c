use reqwest::Client;

use crate::{Res, config::Config, info, spotify::auth::InteractiveResolver};

/// Runs the browser authorization on its own and caches the token.
///
/// Prints the refresh token so it can be stored as `SPOTIFY_REFRESH_TOKEN`
/// for unattended runs.
pub async fn auth(config: &Config) -> Res<()> {
    let resolver = InteractiveResolver::new(config, Client::new())?;
    let token = resolver.authorize().await?;

    info!(
        "Refresh token for unattended runs (store it as SPOTIFY_REFRESH_TOKEN):\n{}",
        token.refresh_token
    );
    Ok(())
}

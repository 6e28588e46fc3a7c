use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{SecondsFormat, Utc};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::errors::ConfigError;

/// Random value sent as the OAuth `state` parameter and checked on callback.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Value of the `Authorization` header for the token endpoint.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {credentials}")
}

/// Current UTC time as RFC 3339 with microseconds, e.g. `2025-01-31T08:15:00.123456Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn current_unix_time() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Host, port and path the callback server has to serve for a redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackAddress {
    pub host: String,
    pub port: u16,
    pub path: String,
}

pub fn parse_redirect_uri(uri: &str) -> Result<CallbackAddress, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidRedirectUri {
        uri: uri.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(uri).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "http" {
        return Err(invalid("only http redirect URIs can be served locally"));
    }
    let host = url
        .host_str()
        .ok_or_else(|| invalid("missing host"))?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();
    let port = url
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port"))?;

    Ok(CallbackAddress {
        host,
        port,
        path: url.path().to_string(),
    })
}

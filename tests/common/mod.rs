#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use spotify_snapshot::{config::Config, utils};
use tokio::net::TcpListener;

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const REFRESH_TOKEN: &str = "test-refresh-token";
pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const AUTH_CODE: &str = "test-auth-code";

/// What the stubbed Web API answers for one endpoint.
#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Fail(StatusCode),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(body) => Json(body).into_response(),
            Reply::Fail(status) => (status, Json(json!({"error": {"status": status.as_u16()}})))
                .into_response(),
        }
    }
}

pub struct MockSpotify {
    pub artists_year: Reply,
    pub tracks_week: Reply,
    pub track_day: Reply,
}

impl Default for MockSpotify {
    fn default() -> Self {
        Self {
            artists_year: Reply::Json(artists_page()),
            tracks_week: Reply::Json(tracks_page()),
            track_day: Reply::Json(json!({ "items": [track_json("Day Track", &["Solo"], true)] })),
        }
    }
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {ACCESS_TOKEN}").as_str())
}

async fn top_artists(
    State(mock): State<Arc<MockSpotify>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match (query.get("time_range").map(String::as_str), query.get("limit").map(String::as_str)) {
        (Some("long_term"), Some("5")) => mock.artists_year.clone().into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn top_tracks(
    State(mock): State<Arc<MockSpotify>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match (query.get("time_range").map(String::as_str), query.get("limit").map(String::as_str)) {
        (Some("short_term"), Some("5")) => mock.tracks_week.clone().into_response(),
        (Some("short_term"), Some("1")) => mock.track_day.clone().into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// Token endpoint accepting the test client, `REFRESH_TOKEN` and `AUTH_CODE`.
async fn token(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let expected = utils::basic_auth_header(CLIENT_ID, CLIENT_SECRET);
    if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_client", "error_description": "Invalid client"})),
        )
            .into_response();
    }

    let grant = form.get("grant_type").map(String::as_str);
    match grant {
        Some("refresh_token") if form.get("refresh_token").map(String::as_str) == Some(REFRESH_TOKEN) => {
            Json(json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600,
                "scope": "user-top-read user-read-recently-played"
            }))
            .into_response()
        }
        Some("authorization_code") if form.get("code").map(String::as_str) == Some(AUTH_CODE) => {
            Json(json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "issued-refresh-token",
                "scope": "user-top-read user-read-recently-played"
            }))
            .into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "Invalid refresh token"})),
        )
            .into_response(),
    }
}

/// Starts the stub on an ephemeral port and returns its base URL.
pub async fn serve(mock: MockSpotify) -> String {
    let app = Router::new()
        .route("/v1/me/top/artists", get(top_artists))
        .route("/v1/me/top/tracks", get(top_tracks))
        .route("/api/token", post(token))
        .with_state(Arc::new(mock));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn config_with(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

/// Configuration pointing every endpoint at the stub.
pub fn stub_config(base: &str, output: &Path) -> Config {
    let api_url = format!("{base}/v1");
    let token_url = format!("{base}/api/token");
    let output = output.to_string_lossy().to_string();
    config_with(&[
        ("SPOTIFY_CLIENT_ID", CLIENT_ID),
        ("SPOTIFY_CLIENT_SECRET", CLIENT_SECRET),
        ("SPOTIFY_REFRESH_TOKEN", REFRESH_TOKEN),
        ("SPOTIFY_API_URL", &api_url),
        ("SPOTIFY_TOKEN_URL", &token_url),
        ("SPOTIFY_DATA_OUTPUT", &output),
    ])
}

pub fn temp_output() -> PathBuf {
    std::env::temp_dir()
        .join(format!("spotify-snapshot-test-{}", utils::generate_state()))
        .join("data")
        .join("spotify-data.json")
}

pub fn artist_json(name: &str, with_image: bool) -> Value {
    let images = if with_image {
        json!([
            {"url": format!("https://i.scdn.co/image/{name}-640"), "height": 640, "width": 640},
            {"url": format!("https://i.scdn.co/image/{name}-160"), "height": 160, "width": 160}
        ])
    } else {
        json!([])
    };
    json!({
        "id": format!("{name}-id"),
        "name": name,
        "images": images,
        "popularity": 70,
        "external_urls": {"spotify": format!("https://open.spotify.com/artist/{name}")}
    })
}

pub fn track_json(name: &str, artists: &[&str], with_image: bool) -> Value {
    let images = if with_image {
        json!([{"url": format!("https://i.scdn.co/image/{name}-album"), "height": 640, "width": 640}])
    } else {
        json!([])
    };
    json!({
        "id": format!("{name}-id"),
        "name": name,
        "duration_ms": 200000,
        "artists": artists
            .iter()
            .map(|a| json!({"name": a, "external_urls": {"spotify": "https://open.spotify.com/artist/x"}}))
            .collect::<Vec<_>>(),
        "album": {"id": "album-id", "name": "Album", "images": images},
        "external_urls": {"spotify": format!("https://open.spotify.com/track/{name}")}
    })
}

pub fn artists_page() -> Value {
    json!({
        "items": (["A1", "A2", "A3", "A4", "A5"]
            .iter()
            .enumerate()
            .map(|(i, name)| artist_json(name, i != 2))
            .collect::<Vec<_>>()),
        "total": 50,
        "limit": 5
    })
}

pub fn tracks_page() -> Value {
    json!({
        "items": [
            track_json("T1", &["Björk"], true),
            track_json("T2", &["X", "Y", "Z"], true),
            track_json("T3", &["Solo"], false),
        ],
        "total": 50,
        "limit": 5
    })
}

//! # API Module
//!
//! HTTP handlers for the short-lived web server that receives the OAuth
//! redirect during interactive authorization.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization page,
//!   checks the `state` parameter and exchanges the authorization code for a
//!   token. The token is handed to the waiting flow through shared state.
//!
//! The route path is taken from the configured redirect URI, so the default
//! `http://localhost:8080/callback` is served as `/callback` on port 8080.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotify_snapshot::api::callback;
//!
//! let app = Router::new().route("/callback", get(callback));
//! ```

mod callback;

pub use callback::callback;

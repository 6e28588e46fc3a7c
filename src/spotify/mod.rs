//! # Spotify Integration Module
//!
//! This module is the integration layer between the snapshot pipeline and
//! Spotify's services. It handles the OAuth token endpoint, the browser based
//! authorization flow and the read-only Web API calls for the user's top items.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (update, auth)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code / refresh token)
//!     └── Top Items (artists, tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts Service / Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Credential resolution:
//! - **CredentialResolver**: The strategy the pipeline is generic over
//! - **InteractiveResolver**: Token cache, refresh, and browser flow with a
//!   local callback server
//! - **RefreshTokenResolver**: Exchanges a pre-issued refresh token, for
//!   scheduled runs without a browser
//! - **OAuthClient**: Authorize URL construction and token endpoint calls
//!   using HTTP Basic client authentication
//!
//! ### Top Items Module
//!
//! [`top`] - [`SpotifyApi`] wraps the `/me/top/{artists,tracks}` endpoints
//! parameterized by [`crate::types::TimeRange`] and a result limit. Every call
//! returns a typed [`crate::errors::FetchError`] on failure and leaves the
//! decision of how to degrade to the caller.
//!
//! ## Permission Scopes
//!
//! All flows request `user-top-read` and `user-read-recently-played`
//! (see [`crate::config::SPOTIFY_SCOPE`]).

pub mod auth;
pub mod top;

pub use top::SpotifyApi;

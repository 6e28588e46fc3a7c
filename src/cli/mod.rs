//! # CLI Module
//!
//! Command implementations behind the `spotify-snapshot` binary.
//!
//! ## Commands
//!
//! - [`update`] - The default command. Resolves an access token, fetches the
//!   top artists of the year, the top tracks of the week and the #1 track of
//!   the day, and overwrites the snapshot file.
//! - [`auth`] - Runs only the interactive authorization and caches the token.
//!
//! ## Data Flow
//!
//! ```text
//! Credential Resolver (interactive | refresh token)
//!     ↓
//! Fetchers (top artists, top tracks, top track)
//!     ↓
//! Normalizer
//!     ↓
//! Writer (snapshot JSON) + console summary
//! ```
//!
//! ## Error Handling
//!
//! - **Fetch failures** degrade: lists become empty and the single track
//!   becomes a sentinel record. The run continues.
//! - **Setup and write failures** (missing credentials, token exchange, file
//!   write) are returned as [`crate::errors::Error`]; the binary prints them
//!   and exits with status 1.

mod auth;
mod update;

pub use auth::auth;
pub use update::{
    TOP_ARTISTS_YEAR_LIMIT, TOP_TRACKS_WEEK_LIMIT, TopTrack, collect, run, top_artists_year,
    top_track_day, top_tracks_week, update,
};

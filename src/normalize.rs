//! Mapping of raw Spotify records to the snapshot schema.
//!
//! Every function here is pure: one raw record in, one summary out. Optional
//! fields are replaced by fixed placeholder values so the front-end never has
//! to deal with missing images.

use crate::types::{Artist, ArtistSummary, Image, Track, TrackSummary};

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/300x300/1db954/ffffff?text=";

/// Link used by the sentinel records.
pub const SPOTIFY_HOME_URL: &str = "https://open.spotify.com";

pub const NO_DATA_NAME: &str = "No data available";
pub const LOAD_ERROR_NAME: &str = "Error loading data";
pub const UNKNOWN_ARTISTS: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Artist,
    Album,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Normal,
    NoData,
    Error,
}

/// Returns the placeholder image URL for an entity kind and state.
///
/// The no-data and error placeholders are the same for both kinds.
pub fn placeholder_image(kind: ImageKind, state: ImageState) -> String {
    let text = match (kind, state) {
        (ImageKind::Artist, ImageState::Normal) => "Artist",
        (ImageKind::Album, ImageState::Normal) => "Album",
        (_, ImageState::NoData) => "No+Data",
        (_, ImageState::Error) => "Error",
    };
    format!("{PLACEHOLDER_BASE}{text}")
}

fn first_image_or(images: Option<&[Image]>, kind: ImageKind) -> String {
    images
        .and_then(|images| images.first())
        .map(|image| image.url.clone())
        .unwrap_or_else(|| placeholder_image(kind, ImageState::Normal))
}

pub fn artist_summary(artist: &Artist) -> ArtistSummary {
    ArtistSummary {
        name: artist.name.clone(),
        image: first_image_or(artist.images.as_deref(), ImageKind::Artist),
        spotify_url: artist.external_urls.spotify.clone(),
    }
}

pub fn track_summary(track: &Track) -> TrackSummary {
    TrackSummary {
        name: track.name.clone(),
        artists: track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        album_image: first_image_or(track.album.images.as_deref(), ImageKind::Album),
        spotify_url: track.external_urls.spotify.clone(),
    }
}

pub fn artist_summaries(artists: &[Artist]) -> Vec<ArtistSummary> {
    artists.iter().map(artist_summary).collect()
}

pub fn track_summaries(tracks: &[Track]) -> Vec<TrackSummary> {
    tracks.iter().map(track_summary).collect()
}

impl TrackSummary {
    /// Record written when the user has no qualifying listening history.
    pub fn no_data() -> Self {
        Self::sentinel(NO_DATA_NAME, ImageState::NoData)
    }

    /// Record written when the request for the track failed.
    pub fn load_error() -> Self {
        Self::sentinel(LOAD_ERROR_NAME, ImageState::Error)
    }

    fn sentinel(name: &str, state: ImageState) -> Self {
        Self {
            name: name.to_string(),
            artists: UNKNOWN_ARTISTS.to_string(),
            album_image: placeholder_image(ImageKind::Album, state),
            spotify_url: SPOTIFY_HOME_URL.to_string(),
        }
    }
}

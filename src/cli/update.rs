use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;

use crate::{
    Res,
    config::{AuthMode, Config},
    errors::FetchError,
    info,
    management::SnapshotManager,
    normalize,
    spotify::{
        SpotifyApi,
        auth::{CredentialResolver, InteractiveResolver, RefreshTokenResolver},
    },
    success,
    types::{ArtistSummary, ArtistTableRow, Snapshot, TimeRange, TrackSummary, TrackTableRow},
    utils, warning,
};

pub const TOP_ARTISTS_YEAR_LIMIT: u32 = 5;
pub const TOP_TRACKS_WEEK_LIMIT: u32 = 5;

/// Outcome of the "#1 track right now" request.
#[derive(Debug)]
pub enum TopTrack {
    Found(TrackSummary),
    /// The user has no qualifying listening history.
    NoData,
    Failed(FetchError),
}

impl TopTrack {
    /// The record written to the snapshot, sentinel values included.
    pub fn to_summary(&self) -> TrackSummary {
        match self {
            TopTrack::Found(track) => track.clone(),
            TopTrack::NoData => TrackSummary::no_data(),
            TopTrack::Failed(_) => TrackSummary::load_error(),
        }
    }
}

/// Fetches and writes a snapshot, picking the credential flow from `config`.
///
/// Credentials are validated before anything touches the network.
pub async fn update(config: &Config) -> Res<Snapshot> {
    let http = Client::new();

    match config.auth_mode() {
        AuthMode::RefreshToken => {
            let resolver = RefreshTokenResolver::new(config, http.clone())?;
            run(&resolver, config, http).await
        }
        AuthMode::Interactive => {
            let resolver = InteractiveResolver::new(config, http.clone())?;
            run(&resolver, config, http).await
        }
    }
}

/// The snapshot pipeline: authenticate, fetch, normalize, write, report.
pub async fn run<R: CredentialResolver>(
    resolver: &R,
    config: &Config,
    http: Client,
) -> Res<Snapshot> {
    info!("Connecting to Spotify...");
    let token = resolver.access_token().await?;
    let api = SpotifyApi::new(http, &config.api_url, &token.access_token);

    let snapshot = collect(&api).await;

    let snapshot_mgr = SnapshotManager::new(&config.output_path);
    snapshot_mgr.persist(&snapshot).await?;

    print_summary(&snapshot, snapshot_mgr.path());
    Ok(snapshot)
}

/// Runs the three fetches in order and assembles the snapshot.
///
/// Never fails: list fetches degrade to empty lists and the single track to
/// its sentinel record.
pub async fn collect(api: &SpotifyApi) -> Snapshot {
    info!("Fetching your top artists for the year...");
    let top_artists_year = top_artists_year(api).await.unwrap_or_else(|e| {
        warning!("Error fetching top artists: {}", e);
        Vec::new()
    });

    info!("Fetching your top tracks for the week...");
    let top_tracks_week = top_tracks_week(api).await.unwrap_or_else(|e| {
        warning!("Error fetching top tracks: {}", e);
        Vec::new()
    });

    info!("Fetching your #1 track for today...");
    let top_track_day = top_track_day(api).await;
    if let TopTrack::Failed(e) = &top_track_day {
        warning!("Error fetching top track: {}", e);
    }

    Snapshot {
        last_updated: utils::timestamp_now(),
        top_artists_year,
        top_tracks_week,
        top_track_day: top_track_day.to_summary(),
    }
}

pub async fn top_artists_year(api: &SpotifyApi) -> Result<Vec<ArtistSummary>, FetchError> {
    let pb = spinner("Fetching top artists (long term)...");
    let artists = api
        .top_artists(TimeRange::LongTerm, TOP_ARTISTS_YEAR_LIMIT)
        .await;
    pb.finish_and_clear();

    Ok(normalize::artist_summaries(&artists?))
}

pub async fn top_tracks_week(api: &SpotifyApi) -> Result<Vec<TrackSummary>, FetchError> {
    let pb = spinner("Fetching top tracks (short term)...");
    let tracks = api
        .top_tracks(TimeRange::ShortTerm, TOP_TRACKS_WEEK_LIMIT)
        .await;
    pb.finish_and_clear();

    Ok(normalize::track_summaries(&tracks?))
}

pub async fn top_track_day(api: &SpotifyApi) -> TopTrack {
    let pb = spinner("Fetching top track (short term)...");
    let tracks = api.top_tracks(TimeRange::ShortTerm, 1).await;
    pb.finish_and_clear();

    match tracks {
        Ok(tracks) => match tracks.first() {
            Some(track) => TopTrack::Found(normalize::track_summary(track)),
            None => TopTrack::NoData,
        },
        Err(e) => TopTrack::Failed(e),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn print_summary(snapshot: &Snapshot, path: &Path) {
    success!("Successfully updated Spotify data!");
    info!("Data saved to: {}", path.display());
    info!("Last updated: {}", snapshot.last_updated);

    println!("\nSummary:");
    println!("   - Top Artists: {}", snapshot.top_artists_year.len());
    println!("   - Top Tracks: {}", snapshot.top_tracks_week.len());
    println!("   - #1 Track: {}", snapshot.top_track_day.name);

    if !snapshot.top_artists_year.is_empty() {
        let rows: Vec<ArtistTableRow> = snapshot
            .top_artists_year
            .iter()
            .enumerate()
            .map(|(i, a)| ArtistTableRow {
                rank: i + 1,
                name: a.name.clone(),
            })
            .collect();
        println!("\n{}", Table::new(rows));
    }

    if !snapshot.top_tracks_week.is_empty() {
        let rows: Vec<TrackTableRow> = snapshot
            .top_tracks_week
            .iter()
            .enumerate()
            .map(|(i, t)| TrackTableRow {
                rank: i + 1,
                name: t.name.clone(),
                artists: t.artists.clone(),
            })
            .collect();
        println!("\n{}", Table::new(rows));
    }
}

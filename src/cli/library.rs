use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::TokenManager,
    merge::merge_track_features,
    spotify::{
        SpotifyClient,
        features::{DEFAULT_FEATURE_CHUNK_SIZE, fetch_audio_features},
        library::{DEFAULT_TRACKS_PAGE_SIZE, fetch_library},
    },
    success,
    types::{MergedTrack, TrackTableRow},
    utils,
};

/// Fetches the saved-track library with audio features and displays it.
///
/// Runs the full pipeline: library pages, audio-feature chunks, positional
/// merge. With `json` set the merged records are printed as pretty JSON;
/// otherwise a table with one row per track is shown.
///
/// # Arguments
///
/// * `limit` - Page size for library requests (clamped to 1..=50, default 50)
/// * `chunk_size` - Id count per feature request (clamped to 1..=100,
///   default 100)
/// * `json` - Emit JSON instead of a table
pub async fn library(limit: Option<u64>, chunk_size: Option<usize>, json: bool) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run splibcli auth\n Error: {}",
                e
            );
        }
    };

    let token = token_mgr.get_valid_token().await;
    let client = SpotifyClient::new(token);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching library tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let tracks = match fetch_library(&client, limit.unwrap_or(DEFAULT_TRACKS_PAGE_SIZE)).await {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot fetch library. Err: {}", e);
        }
    };

    pb.set_message(format!(
        "Fetching audio features for {} tracks...",
        tracks.len()
    ));

    let track_ids: Vec<String> = tracks.iter().map(|t| t.track.id.clone()).collect();
    let features = match fetch_audio_features(
        &client,
        &track_ids,
        chunk_size.unwrap_or(DEFAULT_FEATURE_CHUNK_SIZE),
    )
    .await
    {
        Ok(features) => features,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot fetch audio features. Err: {}", e);
        }
    };

    pb.finish_and_clear();

    let merged = merge_track_features(&tracks, &features);
    success!("Fetched {} library tracks!", merged.len());

    if json {
        match serde_json::to_string_pretty(&merged) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Failed to serialize tracks. Err: {}", e),
        }
        return;
    }

    if merged.is_empty() {
        info!("Your library is empty.");
        return;
    }

    let table_rows: Vec<TrackTableRow> = merged.into_iter().map(to_table_row).collect();
    let table = Table::new(table_rows);
    println!("{}", table);
}

fn to_table_row(track: MergedTrack) -> TrackTableRow {
    TrackTableRow {
        added: track.added_at.chars().take(10).collect(),
        name: track.name,
        artists: track.artists.join(","),
        album: track.album_name,
        length: utils::format_duration_ms(track.duration_ms),
        tempo: format!("{:.0}", track.features.tempo),
        energy: format!("{:.2}", track.features.energy),
    }
}

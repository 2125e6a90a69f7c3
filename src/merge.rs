//! Joins saved tracks with their audio features.

use crate::types::{AudioFeature, MergedTrack, SavedTrack, TrackFeatures};

/// Merges a track list and a positionally aligned feature list into one
/// denormalized record per track.
///
/// The caller guarantees that `features[i]` describes `tracks[i]`; that
/// alignment falls out of fetching the features for the ids extracted from
/// the track list in order. Each output record flattens the album, artist,
/// and track fields and nests a [`TrackFeatures`] combining the track's
/// popularity with every audio-feature field. Output ordering equals input
/// ordering; nothing is sorted or deduplicated.
///
/// Lists of unequal length are truncated to the shorter one (zip semantics).
pub fn merge_track_features(tracks: &[SavedTrack], features: &[AudioFeature]) -> Vec<MergedTrack> {
    tracks
        .iter()
        .zip(features.iter())
        .map(|(saved, feature)| {
            let track = &saved.track;
            MergedTrack {
                added_at: saved.added_at.clone(),
                album_id: track.album.id.clone(),
                album_name: track.album.name.clone(),
                album_release_date: track.album.release_date.clone(),
                artists: track.artists.iter().map(|a| a.name.clone()).collect(),
                disc_number: track.disc_number,
                duration_ms: track.duration_ms,
                explicit: track.explicit,
                id: track.id.clone(),
                name: track.name.clone(),
                track_number: track.track_number,
                features: TrackFeatures {
                    popularity: track.popularity,
                    acousticness: feature.acousticness,
                    danceability: feature.danceability,
                    energy: feature.energy,
                    instrumentalness: feature.instrumentalness,
                    key: feature.key,
                    liveness: feature.liveness,
                    loudness: feature.loudness,
                    mode: feature.mode,
                    speechiness: feature.speechiness,
                    tempo: feature.tempo,
                    time_signature: feature.time_signature,
                    valence: feature.valence,
                },
            }
        })
        .collect()
}

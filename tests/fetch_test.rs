use std::collections::HashMap;
use std::sync::Mutex;

use splibcli::Res;
use splibcli::error::FetchError;
use splibcli::spotify::TrackCatalog;
use splibcli::spotify::features::fetch_audio_features;
use splibcli::spotify::library::{fetch_library, remaining_offsets};
use splibcli::types::{AudioFeature, SavedTrack, SavedTracksPage, TrackAlbum, TrackArtist, TrackObject};

// Helper function to create a test saved track
fn create_test_track(id: &str) -> SavedTrack {
    SavedTrack {
        added_at: "2023-10-01T12:00:00Z".to_string(),
        track: TrackObject {
            id: id.to_string(),
            name: format!("{} name", id),
            album: TrackAlbum {
                id: format!("{}_album", id),
                name: "Album".to_string(),
                release_date: "2023-09-01".to_string(),
            },
            artists: vec![TrackArtist {
                id: format!("{}_artist", id),
                name: "Artist".to_string(),
            }],
            disc_number: 1,
            duration_ms: 180_000,
            explicit: false,
            popularity: 50,
            track_number: 1,
        },
    }
}

fn create_test_page(ids: &[&str], total: u64, has_next: bool) -> SavedTracksPage {
    SavedTracksPage {
        items: ids.iter().map(|id| create_test_track(id)).collect(),
        total,
        next: has_next.then(|| "next".to_string()),
    }
}

fn create_test_feature(id: &str) -> AudioFeature {
    AudioFeature {
        id: id.to_string(),
        acousticness: 0.1,
        danceability: 0.2,
        energy: 0.3,
        instrumentalness: 0.4,
        key: 5,
        liveness: 0.5,
        loudness: -7.5,
        mode: 1,
        speechiness: 0.05,
        tempo: 120.0,
        time_signature: 4,
        valence: 0.6,
    }
}

/// In-memory catalog that serves canned pages keyed by offset, derives
/// feature responses from the requested ids, and records every request.
#[derive(Default)]
struct FakeCatalog {
    pages: HashMap<u64, SavedTracksPage>,
    failing_offsets: Vec<u64>,
    fail_features: bool,
    track_calls: Mutex<Vec<(u64, u64)>>,
    feature_calls: Mutex<Vec<Vec<String>>>,
}

impl TrackCatalog for FakeCatalog {
    async fn saved_tracks(&self, limit: u64, offset: u64) -> Res<SavedTracksPage> {
        self.track_calls.lock().unwrap().push((limit, offset));

        if self.failing_offsets.contains(&offset) {
            return Err("some error".into());
        }

        self.pages
            .get(&offset)
            .cloned()
            .ok_or_else(|| format!("no page at offset {}", offset).into())
    }

    async fn audio_features(&self, ids: &[String]) -> Res<Vec<AudioFeature>> {
        self.feature_calls.lock().unwrap().push(ids.to_vec());

        if self.fail_features {
            return Err("some error".into());
        }

        Ok(ids.iter().map(|id| create_test_feature(id)).collect())
    }
}

#[tokio::test]
async fn test_fetch_library_single_page() {
    // total=2, page_size=50: everything fits in the initial page
    let catalog = FakeCatalog {
        pages: HashMap::from([(0, create_test_page(&["item1", "item2"], 2, false))]),
        ..Default::default()
    };

    let tracks = fetch_library(&catalog, 50).await.unwrap();

    let ids: Vec<&str> = tracks.iter().map(|t| t.track.id.as_str()).collect();
    assert_eq!(ids, vec!["item1", "item2"]);

    // Exactly one request at offset 0, no fan-out
    let calls = catalog.track_calls.lock().unwrap();
    assert_eq!(*calls, vec![(50, 0)]);
}

#[tokio::test]
async fn test_fetch_library_combines_pages_in_offset_order() {
    // total=8, page_size=3: offsets 0, 3, 6
    let catalog = FakeCatalog {
        pages: HashMap::from([
            (0, create_test_page(&["item1", "item2", "item3"], 8, true)),
            (3, create_test_page(&["item4", "item5", "item6"], 8, true)),
            (6, create_test_page(&["item7", "item8"], 8, false)),
        ]),
        ..Default::default()
    };

    let tracks = fetch_library(&catalog, 3).await.unwrap();

    // All 8 items, in library order
    let ids: Vec<&str> = tracks.iter().map(|t| t.track.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["item1", "item2", "item3", "item4", "item5", "item6", "item7", "item8"]
    );

    // Every offset requested exactly once, initial page first
    let mut calls = catalog.track_calls.lock().unwrap().clone();
    assert_eq!(calls.remove(0), (3, 0));
    calls.sort();
    assert_eq!(calls, vec![(3, 3), (3, 6)]);
}

#[tokio::test]
async fn test_fetch_library_initial_failure() {
    let catalog = FakeCatalog {
        failing_offsets: vec![0],
        ..Default::default()
    };

    let err = fetch_library(&catalog, 50).await.unwrap_err();
    assert!(matches!(err, FetchError::InitialPage { .. }));
    assert_eq!(
        err.to_string(),
        "failed to get first page of library tracks: some error"
    );

    let calls = catalog.track_calls.lock().unwrap();
    assert_eq!(*calls, vec![(50, 0)]);
}

#[tokio::test]
async fn test_fetch_library_subsequent_failure_is_atomic() {
    // First page succeeds, second page fails: distinct error, no partial result
    let catalog = FakeCatalog {
        pages: HashMap::from([(0, create_test_page(&["item1", "item2"], 4, true))]),
        failing_offsets: vec![2],
        ..Default::default()
    };

    let err = fetch_library(&catalog, 2).await.unwrap_err();
    assert!(matches!(err, FetchError::SubsequentPage { .. }));
    assert_eq!(
        err.to_string(),
        "got first page of library tracks but failed to get subsequent: some error"
    );

    let calls = catalog.track_calls.lock().unwrap();
    assert_eq!(*calls, vec![(2, 0), (2, 2)]);
}

#[tokio::test]
async fn test_fetch_library_fails_even_when_other_pages_succeed() {
    // Offsets 3 and 6 both requested; only 6 fails, but nothing is returned
    let catalog = FakeCatalog {
        pages: HashMap::from([
            (0, create_test_page(&["item1", "item2", "item3"], 8, true)),
            (3, create_test_page(&["item4", "item5", "item6"], 8, true)),
        ]),
        failing_offsets: vec![6],
        ..Default::default()
    };

    let err = fetch_library(&catalog, 3).await.unwrap_err();
    assert!(matches!(err, FetchError::SubsequentPage { .. }));

    // All pages were still requested before the join settled
    assert_eq!(catalog.track_calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_fetch_library_clamps_page_size() {
    let catalog = FakeCatalog {
        pages: HashMap::from([(0, create_test_page(&["item1"], 1, false))]),
        ..Default::default()
    };

    // Requested size above the API ceiling is clamped down to 50
    fetch_library(&catalog, 500).await.unwrap();

    let calls = catalog.track_calls.lock().unwrap();
    assert_eq!(*calls, vec![(50, 0)]);
}

#[test]
fn test_remaining_offsets() {
    // Single-page totals need no extra requests
    assert!(remaining_offsets(0, 50).is_empty());
    assert!(remaining_offsets(1, 50).is_empty());
    assert!(remaining_offsets(50, 50).is_empty());

    // Offsets are k * page_size for each remaining page below total
    assert_eq!(remaining_offsets(8, 3), vec![3, 6]);
    assert_eq!(remaining_offsets(51, 50), vec![50]);
    assert_eq!(remaining_offsets(100, 50), vec![50]);
    assert_eq!(remaining_offsets(101, 50), vec![50, 100]);
}

#[tokio::test]
async fn test_fetch_features_chunks_in_order() {
    // trackIds=[t1..t5], chunk_size=2 -> chunks [t1,t2], [t3,t4], [t5]
    let catalog = FakeCatalog::default();
    let ids: Vec<String> = ["t1", "t2", "t3", "t4", "t5"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let features = fetch_audio_features(&catalog, &ids, 2).await.unwrap();

    // Result is positionally aligned with the input ids
    let feature_ids: Vec<&str> = features.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(feature_ids, vec!["t1", "t2", "t3", "t4", "t5"]);

    let calls = catalog.feature_calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], vec!["t1", "t2"]);
    assert_eq!(calls[1], vec!["t3", "t4"]);
    assert_eq!(calls[2], vec!["t5"]);
}

#[tokio::test]
async fn test_fetch_features_empty_ids() {
    let catalog = FakeCatalog::default();

    let features = fetch_audio_features(&catalog, &[], 100).await.unwrap();
    assert!(features.is_empty());

    // No request was issued
    assert!(catalog.feature_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_features_failure_is_atomic() {
    let catalog = FakeCatalog {
        fail_features: true,
        ..Default::default()
    };
    let ids: Vec<String> = ["t1", "t2", "t3"].iter().map(|s| s.to_string()).collect();

    let err = fetch_audio_features(&catalog, &ids, 2).await.unwrap_err();
    assert!(matches!(err, FetchError::FeatureChunk { .. }));
    assert_eq!(
        err.to_string(),
        "failed to get track audio features: some error"
    );

    // Both chunks were requested, neither is returned
    assert_eq!(catalog.feature_calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_fetch_features_clamps_chunk_size() {
    let catalog = FakeCatalog::default();
    let ids: Vec<String> = (0..150).map(|i| format!("t{}", i)).collect();

    // Chunk size above the API ceiling is clamped down to 100
    let features = fetch_audio_features(&catalog, &ids, 1000).await.unwrap();
    assert_eq!(features.len(), 150);

    let calls = catalog.feature_calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].len(), 100);
    assert_eq!(calls[1].len(), 50);
}

use splibcli::merge::merge_track_features;
use splibcli::types::{AudioFeature, SavedTrack, TrackAlbum, TrackArtist, TrackObject};

// Helper function to create a test saved track
fn create_test_track(id: &str, name: &str, popularity: u32) -> SavedTrack {
    SavedTrack {
        added_at: format!("2023-10-0{}T12:00:00Z", popularity % 9 + 1),
        track: TrackObject {
            id: id.to_string(),
            name: name.to_string(),
            album: TrackAlbum {
                id: format!("{}_album_id", id),
                name: format!("{} Album", name),
                release_date: "2023-09-01".to_string(),
            },
            artists: vec![
                TrackArtist {
                    id: format!("{}_artist_id", id),
                    name: "Artist A".to_string(),
                },
                TrackArtist {
                    id: format!("{}_artist2_id", id),
                    name: "Artist B".to_string(),
                },
            ],
            disc_number: 1,
            duration_ms: 200_000,
            explicit: false,
            popularity,
            track_number: 4,
        },
    }
}

// Helper function to create a test audio feature record
fn create_test_feature(id: &str, tempo: f64) -> AudioFeature {
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
        tempo,
        time_signature: 4,
        valence: 0.6,
    }
}

#[test]
fn test_merge_combines_track_and_feature_fields() {
    let tracks = vec![
        create_test_track("t1", "Track 1", 10),
        create_test_track("t2", "Track 2", 20),
        create_test_track("t3", "Track 3", 30),
    ];
    let features = vec![
        create_test_feature("t1", 100.0),
        create_test_feature("t2", 120.0),
        create_test_feature("t3", 140.0),
    ];

    let merged = merge_track_features(&tracks, &features);
    assert_eq!(merged.len(), 3);

    for (i, record) in merged.iter().enumerate() {
        // Track fields are flattened from the aligned track
        assert_eq!(record.id, tracks[i].track.id);
        assert_eq!(record.name, tracks[i].track.name);
        assert_eq!(record.added_at, tracks[i].added_at);
        assert_eq!(record.album_id, tracks[i].track.album.id);
        assert_eq!(record.album_name, tracks[i].track.album.name);
        assert_eq!(record.album_release_date, "2023-09-01");
        assert_eq!(record.artists, vec!["Artist A", "Artist B"]);
        assert_eq!(record.disc_number, 1);
        assert_eq!(record.duration_ms, 200_000);
        assert!(!record.explicit);
        assert_eq!(record.track_number, 4);

        // Popularity comes from the track, every other feature field from
        // the aligned feature record
        assert_eq!(record.features.popularity, tracks[i].track.popularity);
        assert_eq!(record.features.tempo, features[i].tempo);
        assert_eq!(record.features.acousticness, 0.1);
        assert_eq!(record.features.danceability, 0.2);
        assert_eq!(record.features.energy, 0.3);
        assert_eq!(record.features.instrumentalness, 0.4);
        assert_eq!(record.features.key, 5);
        assert_eq!(record.features.liveness, 0.5);
        assert_eq!(record.features.loudness, -7.5);
        assert_eq!(record.features.mode, 1);
        assert_eq!(record.features.speechiness, 0.05);
        assert_eq!(record.features.time_signature, 4);
        assert_eq!(record.features.valence, 0.6);
    }
}

#[test]
fn test_merge_preserves_input_order() {
    let tracks = vec![
        create_test_track("z", "Zulu", 1),
        create_test_track("a", "Alpha", 2),
        create_test_track("m", "Mike", 3),
    ];
    let features = vec![
        create_test_feature("z", 90.0),
        create_test_feature("a", 91.0),
        create_test_feature("m", 92.0),
    ];

    let merged = merge_track_features(&tracks, &features);

    // No sorting or deduplication happens
    let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a", "m"]);
}

#[test]
fn test_merge_truncates_to_shorter_input() {
    let tracks = vec![
        create_test_track("t1", "Track 1", 10),
        create_test_track("t2", "Track 2", 20),
    ];
    let features = vec![create_test_feature("t1", 100.0)];

    // Unequal lengths zip down to the shorter list
    let merged = merge_track_features(&tracks, &features);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, "t1");

    let merged = merge_track_features(&tracks[..1], &features);
    assert_eq!(merged.len(), 1);
}

#[test]
fn test_merge_empty_inputs() {
    let merged = merge_track_features(&[], &[]);
    assert!(merged.is_empty());
}

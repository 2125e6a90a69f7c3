use futures::future::join_all;

use crate::{
    error::FetchError,
    spotify::{MAX_FEATURE_IDS_PER_CALL, TrackCatalog},
    types::AudioFeature,
};

/// Default chunk size for audio-feature requests, matching the API ceiling.
pub const DEFAULT_FEATURE_CHUNK_SIZE: usize = MAX_FEATURE_IDS_PER_CALL;

/// Retrieves audio features for an ordered list of track ids, transparently
/// chunking.
///
/// The ids are partitioned into consecutive chunks of at most `chunk_size`
/// in input order, one concurrent request is issued per chunk (all issued
/// before any is awaited), and the chunk results are concatenated in chunk
/// order. Because the chunks were cut from the ordered input, the result is
/// positionally aligned with `track_ids`: feature `i` describes track `i`.
///
/// `chunk_size` is clamped to the API's mandated bounds
/// (1..=[`MAX_FEATURE_IDS_PER_CALL`]). An empty id list returns an empty
/// result without issuing any request.
///
/// # Errors
///
/// [`FetchError::FeatureChunk`] if any chunk request fails. The operation is
/// atomic: chunks that did succeed are discarded and nothing is retried.
pub async fn fetch_audio_features<C: TrackCatalog>(
    catalog: &C,
    track_ids: &[String],
    chunk_size: usize,
) -> Result<Vec<AudioFeature>, FetchError> {
    if track_ids.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = chunk_size.clamp(1, MAX_FEATURE_IDS_PER_CALL);

    let chunks = join_all(
        track_ids
            .chunks(chunk_size)
            .map(|chunk| catalog.audio_features(chunk)),
    )
    .await;

    let mut features = Vec::with_capacity(track_ids.len());
    for chunk in chunks {
        let chunk = chunk.map_err(|source| FetchError::FeatureChunk { source })?;
        features.extend(chunk);
    }

    Ok(features)
}

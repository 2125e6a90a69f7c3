use futures::future::join_all;

use crate::{
    error::FetchError,
    spotify::{MAX_TRACKS_PAGE_SIZE, TrackCatalog},
    types::SavedTrack,
};

/// Default page size for library requests, matching the API ceiling.
pub const DEFAULT_TRACKS_PAGE_SIZE: u64 = MAX_TRACKS_PAGE_SIZE;

/// Retrieves the user's complete saved-track library, transparently
/// paginating.
///
/// Issues one request at offset 0 first. If that page reports no
/// continuation the library fits in a single page and its items are returned
/// directly. Otherwise the remaining offsets are computed from the reported
/// total and requested concurrently; all requests are issued before any is
/// awaited, and the pages are concatenated in ascending offset order (not
/// completion order) so library ordering is preserved.
///
/// `page_size` is clamped to the API's mandated bounds
/// (1..=[`MAX_TRACKS_PAGE_SIZE`]).
///
/// # Errors
///
/// - [`FetchError::InitialPage`] if the first request fails.
/// - [`FetchError::SubsequentPage`] if any later page request fails. The
///   operation is atomic: pages that did succeed are discarded and no
///   partial library is returned. Nothing is retried.
pub async fn fetch_library<C: TrackCatalog>(
    catalog: &C,
    page_size: u64,
) -> Result<Vec<SavedTrack>, FetchError> {
    let page_size = page_size.clamp(1, MAX_TRACKS_PAGE_SIZE);

    let first = catalog
        .saved_tracks(page_size, 0)
        .await
        .map_err(|source| FetchError::InitialPage { source })?;

    let mut tracks = first.items;
    if first.next.is_none() {
        return Ok(tracks);
    }

    let offsets = remaining_offsets(first.total, page_size);
    let pages = join_all(
        offsets
            .iter()
            .map(|&offset| catalog.saved_tracks(page_size, offset)),
    )
    .await;

    for page in pages {
        let page = page.map_err(|source| FetchError::SubsequentPage { source })?;
        tracks.extend(page.items);
    }

    Ok(tracks)
}

/// Offsets of every page after the first, given the reported total.
///
/// For `k` in `1..ceil(total / page_size)` this yields `k * page_size`, i.e.
/// exactly the offsets below `total` that the initial request at offset 0
/// did not cover.
pub fn remaining_offsets(total: u64, page_size: u64) -> Vec<u64> {
    if total == 0 {
        return Vec::new();
    }

    (1..total.div_ceil(page_size))
        .map(|k| k * page_size)
        .collect()
}

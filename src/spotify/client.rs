use reqwest::Client;

use crate::{
    Res, config,
    types::{AudioFeature, AudioFeaturesResponse, SavedTracksPage},
};

/// Page-size ceiling Spotify enforces on `GET /me/tracks`.
pub const MAX_TRACKS_PAGE_SIZE: u64 = 50;

/// Id-count ceiling Spotify enforces on `GET /audio-features`.
pub const MAX_FEATURE_IDS_PER_CALL: usize = 100;

/// Remote catalog capability the fetchers depend on.
///
/// One method per endpoint the pipeline needs; both are independently
/// failable. The production implementation is [`SpotifyClient`]; tests
/// provide an in-memory catalog that records requests. The futures are only
/// ever awaited on the calling task, so no `Send` bound is required.
#[allow(async_fn_in_trait)]
pub trait TrackCatalog {
    /// Returns one page of the user's saved tracks starting at `offset`.
    async fn saved_tracks(&self, limit: u64, offset: u64) -> Res<SavedTracksPage>;

    /// Returns the audio features for up to [`MAX_FEATURE_IDS_PER_CALL`] ids.
    async fn audio_features(&self, ids: &[String]) -> Res<Vec<AudioFeature>>;
}

/// Spotify Web API implementation of [`TrackCatalog`].
///
/// Constructed with a bearer access token which is attached to every
/// request. The token is treated as an opaque capability; refreshing it is
/// the caller's concern (see `management::TokenManager`). HTTP error
/// statuses and malformed payloads are propagated immediately, never
/// retried.
pub struct SpotifyClient {
    http: Client,
    token: String,
}

impl SpotifyClient {
    pub fn new(token: String) -> Self {
        SpotifyClient {
            http: Client::new(),
            token,
        }
    }
}

impl TrackCatalog for SpotifyClient {
    async fn saved_tracks(&self, limit: u64, offset: u64) -> Res<SavedTracksPage> {
        let api_url = format!(
            "{uri}/me/tracks?limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            limit = limit,
            offset = offset
        );

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        let page = response.json::<SavedTracksPage>().await?;
        Ok(page)
    }

    async fn audio_features(&self, ids: &[String]) -> Res<Vec<AudioFeature>> {
        let api_url = format!(
            "{uri}/audio-features?ids={ids}",
            uri = &config::spotify_apiurl(),
            ids = ids.join(",")
        );

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        let res = response.json::<AudioFeaturesResponse>().await?;
        Ok(res.audio_features)
    }
}

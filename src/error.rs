//! Error types for the library fetch pipeline.

use thiserror::Error;

/// Boxed underlying cause of a failed remote call.
pub type FetchSource = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the saved-track and audio-feature fetchers.
///
/// Each stage of the pipeline fails with a distinct variant so callers can
/// tell which request rejected. The underlying cause is preserved as the
/// error source for diagnostics. None of these failures is retried; the
/// operation that produced the error returns no partial result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The first page request for the saved-track library rejected.
    #[error("failed to get first page of library tracks: {source}")]
    InitialPage { source: FetchSource },

    /// A non-first page request rejected after the first page succeeded.
    #[error("got first page of library tracks but failed to get subsequent: {source}")]
    SubsequentPage { source: FetchSource },

    /// An audio-feature chunk request rejected.
    #[error("failed to get track audio features: {source}")]
    FeatureChunk { source: FetchSource },
}

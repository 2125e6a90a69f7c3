//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by
//! splibcli: authentication and retrieval of the saved-track library with
//! its audio features. It abstracts away HTTP requests, the OAuth flow, and
//! API pagination quirks behind a small set of async functions.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Library Fetch (saved tracks, offset pagination)
//!     └── Feature Fetch (audio features, id chunking)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: verifier/challenge generation, local
//!   callback server, browser launch, token exchange and persistence.
//! - [`library`] - Retrieval of the complete saved-track library. One
//!   initial page establishes the total; the remaining pages are requested
//!   concurrently and concatenated in offset order.
//! - [`features`] - Retrieval of audio features for an ordered id list,
//!   split into bounded chunks that are requested concurrently and
//!   concatenated in chunk order.
//!
//! ## The Catalog Seam
//!
//! The fetchers are generic over the [`TrackCatalog`] trait rather than tied
//! to a concrete HTTP client. [`SpotifyClient`] is the production
//! implementation; it is constructed with a bearer access token and never
//! inspects or refreshes the token itself. Tests substitute an in-memory
//! catalog to exercise pagination and failure semantics without a network.
//!
//! ## Failure Semantics
//!
//! Every fetch is atomic: a failed page or chunk request fails the whole
//! operation and discards data already obtained from the requests that
//! succeeded. Failures are not retried at this layer; callers wanting
//! timeouts or retries must wrap the calls externally.

pub mod auth;
mod client;
pub mod features;
pub mod library;

pub use client::{MAX_FEATURE_IDS_PER_CALL, MAX_TRACKS_PAGE_SIZE, SpotifyClient, TrackCatalog};

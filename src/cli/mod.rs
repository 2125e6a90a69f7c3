//! # CLI Module
//!
//! User-facing command implementations for splibcli. Each command delegates
//! to the spotify and management modules while handling progress feedback
//! and error presentation.
//!
//! ## Commands
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//! - [`library`] - Fetches the saved-track library with audio features and
//!   renders it as a table or JSON
//!
//! ## Data Flow
//!
//! The `library` command runs the whole pipeline:
//!
//! 1. Load a valid access token (refreshing if needed)
//! 2. Fetch every page of the saved-track library
//! 3. Fetch the audio features for the collected track ids
//! 4. Merge both lists positionally into denormalized records
//! 5. Render the result
//!
//! Fetch failures are surfaced with the stage that failed and terminate the
//! command; no partial library is ever displayed.

mod auth;
mod library;

pub use auth::auth;
pub use library::library;

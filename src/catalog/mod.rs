//! # Remote Catalog Module
//!
//! The only door to the remote music catalog. Everything above this module
//! talks to a [`CatalogClient`], so the pipeline can run against Spotify
//! ([`SpotifyClient`]) or an in-memory fake in tests.
//!
//! ## Pacing
//!
//! The catalog is rate limited. Every remote call made by the pipeline is
//! followed by a fixed delay, see [`Pacer`]. This is the only suspension
//! point of a run; calls are issued strictly one after the other.
//!
//! ## Failures
//!
//! Any failed call (network, auth, rate limit, not found) is returned as an
//! error and ends the run. There is no retry layer.

mod pagination;
mod spotify;

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    Result,
    types::{AlbumObject, ArtistObject, CurrentUser, Page, PlaylistObject, SavedTrackObject},
};

pub use pagination::{Listing, PAGE_SIZE, Paginator, SavedTracks, UserPlaylists};
pub use spotify::SpotifyClient;

/// Operations of the remote catalog used by the pipeline.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Returns the authenticated user.
    async fn current_user(&self) -> Result<CurrentUser>;

    /// Lists the current user's playlists. An empty page means exhausted.
    async fn list_playlists(&self, limit: u32, offset: u32) -> Result<Page<PlaylistObject>>;

    /// Lists the current user's saved tracks. An empty page means exhausted.
    async fn list_saved_tracks(&self, limit: u32, offset: u32) -> Result<Page<SavedTrackObject>>;

    /// Creates a playlist owned by `user_id`.
    async fn create_playlist(&self, user_id: &str, name: &str, public: bool)
    -> Result<PlaylistObject>;

    /// Appends `item_urns` to the playlist, in order, in a single request.
    async fn append_items(&self, playlist_id: &str, item_urns: &[String]) -> Result<()>;

    async fn get_artist(&self, id: &str) -> Result<ArtistObject>;

    async fn get_album(&self, id: &str) -> Result<AlbumObject>;
}

/// Fixed delay awaited after every remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A pacer that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_PACE_DELAY_SECS))
    }
}

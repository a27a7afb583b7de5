use std::marker::PhantomData;

use async_trait::async_trait;

use super::{CatalogClient, Pacer};
use crate::{
    Result, debug,
    types::{Page, PlaylistObject, SavedTrackObject},
};

/// Number of items requested per page.
pub const PAGE_SIZE: u32 = 50;

/// An offset-paginated listing of the remote catalog.
#[async_trait]
pub trait Listing {
    type Item: Send;

    const NAME: &'static str;

    async fn page(catalog: &dyn CatalogClient, limit: u32, offset: u32) -> Result<Page<Self::Item>>;
}

/// The current user's playlists.
pub struct UserPlaylists;

#[async_trait]
impl Listing for UserPlaylists {
    type Item = PlaylistObject;

    const NAME: &'static str = "playlists";

    async fn page(catalog: &dyn CatalogClient, limit: u32, offset: u32) -> Result<Page<PlaylistObject>> {
        catalog.list_playlists(limit, offset).await
    }
}

/// The current user's saved tracks (Liked Songs).
pub struct SavedTracks;

#[async_trait]
impl Listing for SavedTracks {
    type Item = SavedTrackObject;

    const NAME: &'static str = "saved tracks";

    async fn page(catalog: &dyn CatalogClient, limit: u32, offset: u32) -> Result<Page<SavedTrackObject>> {
        catalog.list_saved_tracks(limit, offset).await
    }
}

/// Offset cursor over a [`Listing`].
///
/// Yields one page at a time. The first empty page ends the sequence and
/// no further request is issued until [`Paginator::reset`] is called.
pub struct Paginator<L: Listing> {
    offset: u32,
    page_size: u32,
    exhausted: bool,
    pacer: Pacer,
    _listing: PhantomData<L>,
}

impl<L: Listing> Paginator<L> {
    pub fn new(pacer: Pacer) -> Self {
        Self::with_page_size(PAGE_SIZE, pacer)
    }

    pub fn with_page_size(page_size: u32, pacer: Pacer) -> Self {
        Self {
            offset: 0,
            page_size,
            exhausted: false,
            pacer,
            _listing: PhantomData,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetches the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self, catalog: &dyn CatalogClient) -> Result<Option<Vec<L::Item>>> {
        if self.exhausted {
            return Ok(None);
        }

        debug!("Fetching {} at offset {}", L::NAME, self.offset);
        let page = L::page(catalog, self.page_size, self.offset).await?;

        if page.items.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        self.offset += self.page_size;
        self.pacer.wait().await;

        Ok(Some(page.items))
    }

    /// Restarts the listing from the first page.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.exhausted = false;
    }
}

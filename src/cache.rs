//! Fetch-on-miss caches for remote catalog resources.
//!
//! A [`LazyCache`] maps keys to domain values. On the first lookup of a key
//! it asks its [`FetchStrategy`] to produce the value from the catalog,
//! memoizes it and waits out the pacing delay. Entries live for one run.

use std::collections::{BTreeMap, btree_map::Entry};
use std::fmt::Display;

use async_trait::async_trait;

use crate::{
    Result,
    catalog::{CatalogClient, Pacer},
    debug, info,
    model::{Album, Artist},
    playlist::Playlist,
};

/// How a cache turns a missing key into a value.
#[async_trait]
pub trait FetchStrategy<K: Display + Sync>: Send + Sync {
    type Value: Send;

    /// Short name used in log lines.
    const LABEL: &'static str;

    async fn fetch(&self, catalog: &dyn CatalogClient, key: &K) -> Result<Self::Value>;

    fn log_miss(&self, key: &K) {
        debug!("{} '{}' not found, fetching...", Self::LABEL, key);
    }
}

pub struct LazyCache<K, S>
where
    K: Ord + Clone + Display + Sync,
    S: FetchStrategy<K>,
{
    entries: BTreeMap<K, S::Value>,
    strategy: S,
    pacer: Pacer,
}

impl<K, S> LazyCache<K, S>
where
    K: Ord + Clone + Display + Sync,
    S: FetchStrategy<K>,
{
    pub fn new(strategy: S, pacer: Pacer) -> Self {
        Self {
            entries: BTreeMap::new(),
            strategy,
            pacer,
        }
    }

    /// Returns the value for `key`, fetching it on a miss.
    ///
    /// Fetch errors are returned as is and leave the cache unchanged.
    pub async fn get(&mut self, catalog: &dyn CatalogClient, key: &K) -> Result<&mut S::Value> {
        match self.entries.entry(key.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                self.strategy.log_miss(key);
                let value = self.strategy.fetch(catalog, key).await?;
                let value = entry.insert(value);
                self.pacer.wait().await;
                Ok(value)
            }
        }
    }

    /// Inserts or replaces a value without fetching.
    pub fn set(&mut self, key: K, value: S::Value) {
        self.entries.insert(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut S::Value> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Creates a private playlist named after the key.
pub struct CreatePlaylist {
    pub user_id: String,
}

#[async_trait]
impl FetchStrategy<String> for CreatePlaylist {
    type Value = Playlist;

    const LABEL: &'static str = "Playlist";

    async fn fetch(&self, catalog: &dyn CatalogClient, key: &String) -> Result<Playlist> {
        let created = catalog.create_playlist(&self.user_id, key, false).await?;
        Ok(Playlist::from(created))
    }

    fn log_miss(&self, key: &String) {
        info!("Playlist '{}' not found, creating...", key);
    }
}

pub struct FetchArtist;

#[async_trait]
impl FetchStrategy<String> for FetchArtist {
    type Value = Artist;

    const LABEL: &'static str = "Artist";

    async fn fetch(&self, catalog: &dyn CatalogClient, key: &String) -> Result<Artist> {
        Ok(catalog.get_artist(key).await?.into())
    }
}

pub struct FetchAlbum;

#[async_trait]
impl FetchStrategy<String> for FetchAlbum {
    type Value = Album;

    const LABEL: &'static str = "Album";

    async fn fetch(&self, catalog: &dyn CatalogClient, key: &String) -> Result<Album> {
        Ok(catalog.get_album(key).await?.into())
    }
}

/// Genre playlists by name.
pub type PlaylistCache = LazyCache<String, CreatePlaylist>;
/// Artists by id.
pub type ArtistCache = LazyCache<String, FetchArtist>;
/// Albums by id.
pub type AlbumCache = LazyCache<String, FetchAlbum>;

use std::fmt;

use crate::{
    Result,
    catalog::{CatalogClient, Pacer},
    debug, info,
    model::{UrnKind, urn},
    track::Track,
    types::PlaylistObject,
};

/// Maximum number of items the catalog accepts in one append request.
pub const BATCH_CAP: usize = 100;

/// A remote playlist plus the tracks waiting to be appended to it.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pending: Vec<Track>,
}

impl Playlist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            name: name.into().trim().to_string(),
            pending: Vec::new(),
        }
    }

    pub fn urn(&self) -> String {
        urn(UrnKind::Playlist, &self.id)
    }

    pub fn pending(&self) -> &[Track] {
        &self.pending
    }

    /// Queues `track` for appending and flushes once [`BATCH_CAP`] tracks
    /// are pending.
    ///
    /// Returns `false` without queueing when the track is already pending.
    pub async fn add_track<F>(
        &mut self,
        track: Track,
        catalog: &dyn CatalogClient,
        pacer: &Pacer,
        on_flushed: &mut F,
    ) -> Result<bool>
    where
        F: FnMut(&str, &[Track]) -> Result<()>,
    {
        if self.pending.iter().any(|t| t.id == track.id) {
            return Ok(false);
        }

        self.pending.push(track);

        if self.pending.len() == BATCH_CAP {
            info!("Max tracks for playlist {}, flushing...", self.name);
            self.flush(catalog, pacer, on_flushed).await?;
        }

        Ok(true)
    }

    /// Sends every pending track in one append call, then hands the sent
    /// tracks to `on_flushed` and clears the buffer.
    ///
    /// `on_flushed` runs only after the append call succeeded. Does nothing
    /// when no track is pending. Returns the number of tracks sent.
    pub async fn flush<F>(
        &mut self,
        catalog: &dyn CatalogClient,
        pacer: &Pacer,
        on_flushed: &mut F,
    ) -> Result<usize>
    where
        F: FnMut(&str, &[Track]) -> Result<()>,
    {
        if self.pending.is_empty() {
            return Ok(0);
        }

        debug!("Flushing tracks for playlist: {} ({})", self.name, self.id);
        let uris: Vec<String> = self.pending.iter().map(Track::urn).collect();
        catalog.append_items(&self.id, &uris).await?;
        on_flushed(&self.id, &self.pending)?;
        pacer.wait().await;

        let sent = self.pending.len();
        self.pending.clear();
        Ok(sent)
    }
}

impl From<PlaylistObject> for Playlist {
    fn from(obj: PlaylistObject) -> Self {
        Self::new(obj.id, obj.name)
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Playlist id={} name={}>", self.id, self.name)
    }
}

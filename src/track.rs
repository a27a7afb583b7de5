use std::fmt;

use crate::{
    Error, Result,
    cache::{AlbumCache, ArtistCache},
    catalog::CatalogClient,
    model::{Album, Artist, UrnKind, urn},
    types::SavedTrackObject,
};

/// A saved track with its derived genres.
///
/// `genres` comes from the album when the album has any, otherwise from
/// the first listed artist. It may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: Artist,
    pub album: Album,
    pub genres: Vec<String>,
}

impl Track {
    /// Resolves a saved-track entry, looking up its first artist and its
    /// album through the caches.
    pub async fn resolve(
        item: &SavedTrackObject,
        artists: &mut ArtistCache,
        albums: &mut AlbumCache,
        catalog: &dyn CatalogClient,
    ) -> Result<Self> {
        let raw = &item.track;
        let title = raw.name.trim().to_string();

        let id = raw
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MalformedItem(format!("\"{}\" has no track id", title)))?
            .to_string();

        let artist_id = raw
            .artists
            .first()
            .and_then(|a| a.id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MalformedItem(format!("\"{}\" has no artist id", title)))?
            .to_string();

        let album_id = raw
            .album
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MalformedItem(format!("\"{}\" has no album id", title)))?
            .to_string();

        let artist = artists.get(catalog, &artist_id).await?.clone();
        let album = albums.get(catalog, &album_id).await?.clone();
        let genres = derive_genres(&album, &artist);

        Ok(Self {
            id,
            title,
            artist,
            album,
            genres,
        })
    }

    pub fn urn(&self) -> String {
        urn(UrnKind::Track, &self.id)
    }

    pub fn has_genres(&self) -> bool {
        !self.genres.is_empty()
    }
}

/// Album genres take precedence over artist genres. Genres are trimmed and
/// blank entries dropped.
pub fn derive_genres(album: &Album, artist: &Artist) -> Vec<String> {
    let album_genres = clean_genres(&album.genres);
    if album_genres.is_empty() {
        clean_genres(&artist.genres)
    } else {
        album_genres
    }
}

fn clean_genres(genres: &[String]) -> Vec<String> {
    genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {}", self.title, self.artist.name)
    }
}

use std::fmt;

use crate::types::{AlbumObject, ArtistObject};

/// Scheme prefix of every catalog URN.
pub const URN_SCHEME: &str = "spotify";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrnKind {
    Artist,
    Album,
    Track,
    Playlist,
}

impl fmt::Display for UrnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UrnKind::Artist => "artist",
            UrnKind::Album => "album",
            UrnKind::Track => "track",
            UrnKind::Playlist => "playlist",
        };
        f.write_str(s)
    }
}

/// Formats the canonical URN of a catalog entity, the exact string the
/// append call expects, e.g. `spotify:track:6rqhFgbbKwnb9MLmUQDhG6`.
pub fn urn(kind: UrnKind, id: &str) -> String {
    format!("{}:{}:{}", URN_SCHEME, kind, id)
}

/// Read-only snapshot of an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
}

impl Artist {
    pub fn urn(&self) -> String {
        urn(UrnKind::Artist, &self.id)
    }
}

impl From<ArtistObject> for Artist {
    fn from(obj: ArtistObject) -> Self {
        Self {
            id: obj.id,
            name: obj.name,
            genres: obj.genres,
        }
    }
}

/// Read-only snapshot of an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
}

impl Album {
    pub fn urn(&self) -> String {
        urn(UrnKind::Album, &self.id)
    }
}

impl From<AlbumObject> for Album {
    fn from(obj: AlbumObject) -> Self {
        Self {
            id: obj.id,
            name: obj.name,
            genres: obj.genres,
        }
    }
}

/// Name of the derived playlist holding tracks of `genre`.
///
/// Both parts are trimmed so the name matches the one read back from the
/// playlist listing on the next run.
pub fn genre_playlist_name(prefix: &str, genre: &str) -> String {
    format!("{} {}", prefix.trim(), genre.trim())
}

#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use genrelists::{
    Error, Result,
    catalog::CatalogClient,
    types::{
        AlbumObject, ArtistObject, CurrentUser, Page, PlaylistObject, SavedTrackObject,
        SimpleAlbum, SimpleArtist, TrackObject,
    },
};

#[derive(Default)]
pub struct FakeState {
    pub user_id: String,
    pub playlists: Vec<PlaylistObject>,
    pub saved: Vec<SavedTrackObject>,
    pub artists: HashMap<String, ArtistObject>,
    pub albums: HashMap<String, AlbumObject>,
    pub appends: Vec<(String, Vec<String>)>,
    pub created: Vec<String>,
    pub requests: Vec<String>,
    pub fail_appends: bool,
    next_playlist: usize,
}

/// In-memory catalog recording every call it receives.
pub struct FakeCatalog {
    state: Mutex<FakeState>,
}

impl FakeCatalog {
    pub fn new(user_id: &str) -> Self {
        Self {
            state: Mutex::new(FakeState {
                user_id: user_id.to_string(),
                ..FakeState::default()
            }),
        }
    }

    pub fn with_artist(self, id: &str, genres: &[&str]) -> Self {
        self.state.lock().unwrap().artists.insert(
            id.to_string(),
            ArtistObject {
                id: id.to_string(),
                name: format!("Artist {}", id),
                genres: genres.iter().map(|g| g.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_album(self, id: &str, genres: &[&str]) -> Self {
        self.state.lock().unwrap().albums.insert(
            id.to_string(),
            AlbumObject {
                id: id.to_string(),
                name: format!("Album {}", id),
                genres: genres.iter().map(|g| g.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_saved_track(self, id: &str, artist_id: &str, album_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .saved
            .push(saved_track(id, &format!("Track {}", id), artist_id, album_id));
        self
    }

    pub fn with_playlist(self, id: &str, name: &str) -> Self {
        self.state.lock().unwrap().playlists.push(PlaylistObject {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn failing_appends(self) -> Self {
        self.state.lock().unwrap().fail_appends = true;
        self
    }

    pub fn appends(&self) -> Vec<(String, Vec<String>)> {
        self.state.lock().unwrap().appends.clone()
    }

    pub fn created(&self) -> Vec<String> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn playlist_id(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .playlists
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id.clone())
    }

    fn page<T: Clone>(items: &[T], limit: u32, offset: u32) -> Page<T> {
        let start = (offset as usize).min(items.len());
        let end = (start + limit as usize).min(items.len());
        Page::new(items[start..end].to_vec())
    }
}

pub fn saved_track(id: &str, name: &str, artist_id: &str, album_id: &str) -> SavedTrackObject {
    SavedTrackObject {
        added_at: None,
        track: TrackObject {
            id: Some(id.to_string()),
            name: name.to_string(),
            artists: vec![SimpleArtist {
                id: Some(artist_id.to_string()),
                name: format!("Artist {}", artist_id),
            }],
            album: SimpleAlbum {
                id: Some(album_id.to_string()),
                name: format!("Album {}", album_id),
            },
        },
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn current_user(&self) -> Result<CurrentUser> {
        let state = self.state.lock().unwrap();
        Ok(CurrentUser {
            id: state.user_id.clone(),
            display_name: None,
        })
    }

    async fn list_playlists(&self, limit: u32, offset: u32) -> Result<Page<PlaylistObject>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(format!("playlists@{}", offset));
        Ok(Self::page(&state.playlists, limit, offset))
    }

    async fn list_saved_tracks(&self, limit: u32, offset: u32) -> Result<Page<SavedTrackObject>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(format!("tracks@{}", offset));
        Ok(Self::page(&state.saved, limit, offset))
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistObject> {
        let mut state = self.state.lock().unwrap();
        assert_eq!(user_id, state.user_id);
        assert!(!public);

        state.next_playlist += 1;
        let playlist = PlaylistObject {
            id: format!("created{}", state.next_playlist),
            name: name.to_string(),
        };
        state.playlists.push(playlist.clone());
        state.created.push(name.to_string());
        Ok(playlist)
    }

    async fn append_items(&self, playlist_id: &str, item_urns: &[String]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_appends {
            return Err(Error::Catalog("append rejected".to_string()));
        }
        state
            .appends
            .push((playlist_id.to_string(), item_urns.to_vec()));
        Ok(())
    }

    async fn get_artist(&self, id: &str) -> Result<ArtistObject> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(format!("artist:{}", id));
        state
            .artists
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Catalog(format!("artist {} not found", id)))
    }

    async fn get_album(&self, id: &str) -> Result<AlbumObject> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(format!("album:{}", id));
        state
            .albums
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Catalog(format!("album {} not found", id)))
    }
}

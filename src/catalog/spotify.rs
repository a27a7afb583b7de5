use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::CatalogClient;
use crate::{
    Result,
    auth::TokenManager,
    types::{
        AddItemsRequest, AddItemsResponse, AlbumObject, ArtistObject, CreatePlaylistRequest,
        CurrentUser, Page, PlaylistObject, SavedTrackObject,
    },
};

/// [`CatalogClient`] backed by the Spotify Web API.
///
/// Non-2xx responses are turned into errors with `error_for_status` and
/// propagated as they are; callers pace their own requests.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let token = self.tokens.lock().await.get_valid_token().await?;
        let response = request.bearer_auth(token).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogClient for SpotifyClient {
    async fn current_user(&self) -> Result<CurrentUser> {
        self.send(self.http.get(self.url("/me"))).await
    }

    async fn list_playlists(&self, limit: u32, offset: u32) -> Result<Page<PlaylistObject>> {
        let url = self.url(&format!(
            "/me/playlists?limit={limit}&offset={offset}",
            limit = limit,
            offset = offset
        ));
        self.send(self.http.get(url)).await
    }

    async fn list_saved_tracks(&self, limit: u32, offset: u32) -> Result<Page<SavedTrackObject>> {
        let url = self.url(&format!(
            "/me/tracks?limit={limit}&offset={offset}",
            limit = limit,
            offset = offset
        ));
        self.send(self.http.get(url)).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistObject> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Generated from Liked Songs by genrelists".to_string(),
            public,
        };
        let url = self.url(&format!("/users/{user_id}/playlists", user_id = user_id));
        self.send(self.http.post(url).json(&body)).await
    }

    async fn append_items(&self, playlist_id: &str, item_urns: &[String]) -> Result<()> {
        let body = AddItemsRequest {
            uris: item_urns.to_vec(),
        };
        let url = self.url(&format!("/playlists/{id}/tracks", id = playlist_id));
        let _: AddItemsResponse = self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    async fn get_artist(&self, id: &str) -> Result<ArtistObject> {
        self.send(self.http.get(self.url(&format!("/artists/{id}", id = id))))
            .await
    }

    async fn get_album(&self, id: &str) -> Result<AlbumObject> {
        self.send(self.http.get(self.url(&format!("/albums/{id}", id = id))))
            .await
    }
}

mod common;

use common::FakeCatalog;
use genrelists::{
    cache::{AlbumCache, ArtistCache, CreatePlaylist, FetchAlbum, FetchArtist, PlaylistCache},
    catalog::Pacer,
    model::Artist,
    playlist::Playlist,
};

#[tokio::test]
async fn test_get_fetches_once_then_memoizes() {
    let catalog = FakeCatalog::new("me").with_artist("a1", &["shoegaze"]);
    let mut cache = ArtistCache::new(FetchArtist, Pacer::disabled());

    let first = cache.get(&catalog, &"a1".to_string()).await.unwrap().clone();
    let second = cache.get(&catalog, &"a1".to_string()).await.unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(first.genres, vec!["shoegaze".to_string()]);
    assert_eq!(catalog.requests(), vec!["artist:a1".to_string()]);
}

#[tokio::test]
async fn test_set_prevents_fetch() {
    let catalog = FakeCatalog::new("me");
    let mut cache = ArtistCache::new(FetchArtist, Pacer::disabled());
    cache.set(
        "a1".to_string(),
        Artist {
            id: "a1".to_string(),
            name: "Preloaded".to_string(),
            genres: vec![],
        },
    );

    let artist = cache.get(&catalog, &"a1".to_string()).await.unwrap();

    assert_eq!(artist.name, "Preloaded");
    assert!(catalog.requests().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_propagates_and_caches_nothing() {
    let catalog = FakeCatalog::new("me");
    let mut cache = AlbumCache::new(FetchAlbum, Pacer::disabled());

    let result = cache.get(&catalog, &"missing".to_string()).await;

    assert!(result.is_err());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_playlist_cache_creates_on_miss() {
    let catalog = FakeCatalog::new("me");
    let mut cache = PlaylistCache::new(
        CreatePlaylist {
            user_id: "me".to_string(),
        },
        Pacer::disabled(),
    );
    cache.set("Liked Songs: jazz".to_string(), Playlist::new("pl1", "Liked Songs: jazz"));

    let jazz = cache
        .get(&catalog, &"Liked Songs: jazz".to_string())
        .await
        .unwrap()
        .id
        .clone();
    let rock = cache
        .get(&catalog, &"Liked Songs: rock".to_string())
        .await
        .unwrap()
        .id
        .clone();

    assert_eq!(jazz, "pl1");
    assert_eq!(rock, "created1");
    assert_eq!(catalog.created(), vec!["Liked Songs: rock".to_string()]);

    let keys: Vec<&String> = cache.keys().collect();
    assert_eq!(keys, vec!["Liked Songs: jazz", "Liked Songs: rock"]);
}

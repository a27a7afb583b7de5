mod common;

use common::FakeCatalog;
use genrelists::{
    builder::GenrePlaylistBuilder,
    catalog::Pacer,
    ledger::SqliteLedger,
};
use tempfile::TempDir;

const PREFIX: &str = "Liked Songs:";

async fn run(catalog: &FakeCatalog, ledger: &SqliteLedger) -> genrelists::builder::RunSummary {
    GenrePlaylistBuilder::connect(catalog, ledger, "me", PREFIX, Pacer::disabled())
        .await
        .unwrap()
        .run()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_single_track_end_to_end() {
    let catalog = FakeCatalog::new("me")
        .with_artist("a1", &["shoegaze"])
        .with_album("b1", &["dream pop"])
        .with_saved_track("t1", "a1", "b1");
    let ledger = SqliteLedger::open_in_memory().unwrap();

    let summary = run(&catalog, &ledger).await;

    assert_eq!(catalog.created(), vec!["Liked Songs: dream pop".to_string()]);
    let playlist_id = catalog.playlist_id("Liked Songs: dream pop").unwrap();
    assert_eq!(
        catalog.appends(),
        vec![(playlist_id.clone(), vec!["spotify:track:t1".to_string()])]
    );
    assert!(ledger.check_playlist_track_exists(&playlist_id, "t1").unwrap());
    assert_eq!(
        ledger.playlist_track_counts().unwrap(),
        vec![(playlist_id, 1)]
    );
    assert_eq!(summary.saved_tracks, 1);
    assert_eq!(summary.playlists_created, 1);
    assert_eq!(summary.appended_tracks, 1);
}

#[tokio::test]
async fn test_rerun_does_not_append_again() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("playlists.sqlite");
    let catalog = FakeCatalog::new("me")
        .with_artist("a1", &["post-rock", "ambient"])
        .with_album("b1", &[])
        .with_saved_track("t1", "a1", "b1")
        .with_saved_track("t2", "a1", "b1");

    {
        let ledger = SqliteLedger::open(&path).unwrap();
        run(&catalog, &ledger).await;
    }
    let ledger = SqliteLedger::open(&path).unwrap();
    let second = run(&catalog, &ledger).await;

    assert_eq!(catalog.created().len(), 2);
    assert_eq!(catalog.appends().len(), 2);
    for (_, uris) in catalog.appends() {
        assert_eq!(uris, vec!["spotify:track:t1", "spotify:track:t2"]);
    }
    assert_eq!(second.existing_playlists, 2);
    assert_eq!(second.playlists_created, 0);
    assert_eq!(second.already_recorded, 4);
    assert_eq!(second.appended_tracks, 0);
}

#[tokio::test]
async fn test_padded_genre_reuses_playlist_on_rerun() {
    let catalog = FakeCatalog::new("me")
        .with_artist("a1", &["jazz "])
        .with_album("b1", &[])
        .with_saved_track("t1", "a1", "b1");
    let ledger = SqliteLedger::open_in_memory().unwrap();

    run(&catalog, &ledger).await;
    let second = run(&catalog, &ledger).await;

    assert_eq!(catalog.created(), vec!["Liked Songs: jazz".to_string()]);
    assert_eq!(catalog.appends().len(), 1);
    assert_eq!(second.existing_playlists, 1);
    assert_eq!(second.playlists_created, 0);
    assert_eq!(second.already_recorded, 1);
}

#[tokio::test]
async fn test_existing_genre_playlist_is_reused() {
    let catalog = FakeCatalog::new("me")
        .with_playlist("old", "Liked Songs: jazz")
        .with_playlist("other", "Road trip")
        .with_artist("a1", &["jazz"])
        .with_album("b1", &[])
        .with_saved_track("t1", "a1", "b1");
    let ledger = SqliteLedger::open_in_memory().unwrap();

    let summary = run(&catalog, &ledger).await;

    assert!(catalog.created().is_empty());
    assert_eq!(
        catalog.appends(),
        vec![("old".to_string(), vec!["spotify:track:t1".to_string()])]
    );
    assert_eq!(summary.existing_playlists, 1);
}

#[tokio::test]
async fn test_pre_recorded_pair_is_not_appended() {
    let catalog = FakeCatalog::new("me")
        .with_playlist("old", "Liked Songs: jazz")
        .with_artist("a1", &["jazz"])
        .with_album("b1", &[])
        .with_saved_track("t1", "a1", "b1")
        .with_saved_track("t2", "a1", "b1");
    let ledger = SqliteLedger::open_in_memory().unwrap();
    ledger.record_playlist_track("old", "t1").unwrap();

    run(&catalog, &ledger).await;

    assert_eq!(
        catalog.appends(),
        vec![("old".to_string(), vec!["spotify:track:t2".to_string()])]
    );
}

#[tokio::test]
async fn test_genreless_track_recorded_once_and_never_appended() {
    let catalog = FakeCatalog::new("me")
        .with_artist("a1", &[])
        .with_album("b1", &[])
        .with_saved_track("t1", "a1", "b1");
    let ledger = SqliteLedger::open_in_memory().unwrap();

    let first = run(&catalog, &ledger).await;
    let second = run(&catalog, &ledger).await;

    assert_eq!(first.genreless_tracks, 1);
    assert_eq!(second.genreless_tracks, 1);
    assert!(ledger.is_genreless("t1").unwrap());
    assert_eq!(ledger.genreless_count().unwrap(), 1);
    assert!(catalog.appends().is_empty());
    assert!(catalog.created().is_empty());
}

#[tokio::test]
async fn test_large_library_is_batched() {
    let catalog = (0..230).fold(
        FakeCatalog::new("me")
            .with_artist("a1", &["techno"])
            .with_album("b1", &[]),
        |catalog, i| catalog.with_saved_track(&format!("t{}", i), "a1", "b1"),
    );
    let ledger = SqliteLedger::open_in_memory().unwrap();

    let summary = run(&catalog, &ledger).await;

    let sizes: Vec<usize> = catalog.appends().iter().map(|(_, uris)| uris.len()).collect();
    assert_eq!(sizes, vec![100, 100, 30]);
    assert_eq!(summary.saved_tracks, 230);
    assert_eq!(summary.appended_tracks, 230);
    assert_eq!(ledger.playlist_track_counts().unwrap()[0].1, 230);
}

#[tokio::test]
async fn test_remote_failure_aborts_without_recording() {
    let catalog = FakeCatalog::new("me")
        .with_artist("a1", &["jazz"])
        .with_album("b1", &[])
        .with_saved_track("t1", "a1", "b1")
        .failing_appends();
    let ledger = SqliteLedger::open_in_memory().unwrap();

    let result = GenrePlaylistBuilder::connect(&catalog, &ledger, "me", PREFIX, Pacer::disabled())
        .await
        .unwrap()
        .run()
        .await;

    assert!(result.is_err());
    assert!(ledger.playlist_track_counts().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_artist_aborts_run() {
    let catalog = FakeCatalog::new("me")
        .with_album("b1", &["jazz"])
        .with_saved_track("t1", "ghost", "b1");
    let ledger = SqliteLedger::open_in_memory().unwrap();

    let result = GenrePlaylistBuilder::connect(&catalog, &ledger, "me", PREFIX, Pacer::disabled())
        .await
        .unwrap()
        .run()
        .await;

    assert!(result.is_err());
    assert!(catalog.appends().is_empty());
}

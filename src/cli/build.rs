use crate::{
    Res,
    auth::TokenManager,
    builder::GenrePlaylistBuilder,
    catalog::{Pacer, SpotifyClient},
    config::Settings,
    info,
    ledger::SqliteLedger,
    success,
};

pub async fn build(username: &str) -> Res<()> {
    let settings = Settings::from_env()?;

    let tokens = TokenManager::load(
        settings.token_path.clone(),
        settings.token_url.clone(),
        settings.client_id.clone(),
    )
    .await?;
    let client = SpotifyClient::new(settings.api_url.clone(), tokens);
    let ledger = SqliteLedger::open(&settings.ledger_path)?;
    let pacer = Pacer::new(settings.pace_delay);

    info!("Using ledger at {}", settings.ledger_path.display());

    let builder = GenrePlaylistBuilder::connect(
        &client,
        &ledger,
        username,
        &settings.playlist_prefix,
        pacer,
    )
    .await?;
    let summary = builder.run().await?;

    success!(
        "Processed {} saved tracks: {} queued, {} appended, {} already recorded",
        summary.saved_tracks,
        summary.queued_additions,
        summary.appended_tracks,
        summary.already_recorded
    );
    info!(
        "{} playlists created, {} tracks without genre, {} skipped",
        summary.playlists_created, summary.genreless_tracks, summary.malformed_tracks
    );
    Ok(())
}

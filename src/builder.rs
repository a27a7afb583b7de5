//! # Genre Playlist Builder
//!
//! Drives one run of the pipeline through three phases, strictly in order:
//!
//! 1. **Discover**: page through the user's playlists and seed the
//!    playlist cache with every playlist whose name carries the prefix,
//!    so known genres reuse their playlist instead of creating a new one.
//! 2. **Fan out**: page through the saved tracks, resolve each one's
//!    genres and queue it on every matching genre playlist, unless the
//!    ledger says that pair was already appended.
//! 3. **Flush**: send whatever is still pending on every cached playlist.
//!
//! Tracks without any genre are recorded in the ledger and skipped. Any
//! remote failure ends the run.

use std::fmt;

use crate::{
    Error, Result,
    cache::{AlbumCache, ArtistCache, CreatePlaylist, FetchAlbum, FetchArtist, PlaylistCache},
    catalog::{CatalogClient, Pacer, Paginator, SavedTracks, UserPlaylists},
    debug, info,
    ledger::SqliteLedger,
    model::genre_playlist_name,
    playlist::Playlist,
    track::Track,
    types::SavedTrackObject,
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Discover,
    FanOut,
    Flush,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Discover => "discover genre playlists",
            Phase::FanOut => "fan out saved tracks",
            Phase::Flush => "final flush",
            Phase::Done => "done",
        };
        f.write_str(s)
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub existing_playlists: usize,
    pub saved_tracks: usize,
    pub genreless_tracks: usize,
    pub malformed_tracks: usize,
    pub already_recorded: usize,
    pub queued_additions: usize,
    pub appended_tracks: usize,
    pub playlists_created: usize,
}

pub struct GenrePlaylistBuilder<'a> {
    catalog: &'a dyn CatalogClient,
    ledger: &'a SqliteLedger,
    prefix: String,
    pacer: Pacer,
    phase: Phase,
    playlists: PlaylistCache,
    artists: ArtistCache,
    albums: AlbumCache,
    summary: RunSummary,
}

impl<'a> GenrePlaylistBuilder<'a> {
    /// Looks up the authenticated account and prepares an empty run.
    ///
    /// `username` is the identifier given on the command line. Playlists
    /// are always created for the authenticated account; a mismatch is
    /// only reported.
    pub async fn connect(
        catalog: &'a dyn CatalogClient,
        ledger: &'a SqliteLedger,
        username: &str,
        prefix: &str,
        pacer: Pacer,
    ) -> Result<Self> {
        let user = catalog.current_user().await?;
        pacer.wait().await;

        if user.id != username {
            warning!(
                "Username '{}' differs from the authenticated account '{}', using the latter",
                username,
                user.id
            );
        }

        Ok(Self::new(catalog, ledger, &user.id, prefix, pacer))
    }

    pub fn new(
        catalog: &'a dyn CatalogClient,
        ledger: &'a SqliteLedger,
        user_id: &str,
        prefix: &str,
        pacer: Pacer,
    ) -> Self {
        Self {
            catalog,
            ledger,
            prefix: prefix.trim().to_string(),
            pacer,
            phase: Phase::Discover,
            playlists: PlaylistCache::new(
                CreatePlaylist {
                    user_id: user_id.to_string(),
                },
                pacer,
            ),
            artists: ArtistCache::new(FetchArtist, pacer),
            albums: AlbumCache::new(FetchAlbum, pacer),
            summary: RunSummary::default(),
        }
    }

    /// Runs all phases and returns the run's counters.
    pub async fn run(mut self) -> Result<RunSummary> {
        self.discover_playlists().await?;
        self.fan_out_saved_tracks().await?;
        self.flush_all().await?;
        Ok(self.summary)
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(next > self.phase, "phases only move forward");
        self.phase = next;
        debug!("Entering phase: {}", next);
    }

    async fn discover_playlists(&mut self) -> Result<()> {
        info!("Looking up existing genre playlists");

        let mut pages = Paginator::<UserPlaylists>::new(self.pacer);
        while let Some(items) = pages.next_page(self.catalog).await? {
            for obj in items {
                let playlist = Playlist::from(obj);
                if playlist.name.starts_with(&self.prefix) {
                    self.playlists.set(playlist.name.clone(), playlist);
                }
            }
        }

        self.summary.existing_playlists = self.playlists.len();
        info!(
            "Playlist map generated, {} found",
            self.summary.existing_playlists
        );
        self.advance(Phase::FanOut);
        Ok(())
    }

    async fn fan_out_saved_tracks(&mut self) -> Result<()> {
        info!("Sorting saved tracks into genre playlists");

        let mut pages = Paginator::<SavedTracks>::new(self.pacer);
        while let Some(items) = pages.next_page(self.catalog).await? {
            for item in items {
                self.summary.saved_tracks += 1;
                self.fan_out(&item).await?;
            }
        }

        self.advance(Phase::Flush);
        Ok(())
    }

    async fn fan_out(&mut self, item: &SavedTrackObject) -> Result<()> {
        let track =
            match Track::resolve(item, &mut self.artists, &mut self.albums, self.catalog).await {
                Ok(track) => track,
                Err(Error::MalformedItem(reason)) => {
                    warning!("Skipping saved track: {}", reason);
                    self.summary.malformed_tracks += 1;
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

        if !track.has_genres() {
            info!("No genre found for {}", track);
            self.ledger.record_genreless_track(&track.id)?;
            self.summary.genreless_tracks += 1;
            return Ok(());
        }

        let ledger = self.ledger;
        let mut appended = 0;
        let mut record = ledger_recorder(ledger, &mut appended);

        for genre in &track.genres {
            let name = genre_playlist_name(&self.prefix, genre);
            let created = !self.playlists.contains(&name);
            let playlist = self.playlists.get(self.catalog, &name).await?;
            if created {
                self.summary.playlists_created += 1;
            }

            if ledger.check_playlist_track_exists(&playlist.id, &track.id)? {
                debug!("{} already in {}", track, playlist.name);
                self.summary.already_recorded += 1;
                continue;
            }

            if playlist
                .add_track(track.clone(), self.catalog, &self.pacer, &mut record)
                .await?
            {
                self.summary.queued_additions += 1;
            }
        }

        drop(record);
        self.summary.appended_tracks += appended;
        Ok(())
    }

    async fn flush_all(&mut self) -> Result<()> {
        info!("Flushing remaining tracks");

        let mut appended = 0;
        let mut record = ledger_recorder(self.ledger, &mut appended);

        for playlist in self.playlists.values_mut() {
            playlist
                .flush(self.catalog, &self.pacer, &mut record)
                .await?;
        }

        drop(record);
        self.summary.appended_tracks += appended;
        self.advance(Phase::Done);
        Ok(())
    }
}

/// Flush callback writing every sent (playlist, track) pair to the ledger
/// and counting them in `appended`.
fn ledger_recorder<'l>(
    ledger: &'l SqliteLedger,
    appended: &'l mut usize,
) -> impl FnMut(&str, &[Track]) -> Result<()> + 'l {
    move |playlist_id, tracks| {
        for track in tracks {
            ledger.record_playlist_track(playlist_id, &track.id)?;
        }
        *appended += tracks.len();
        Ok(())
    }
}

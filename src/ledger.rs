//! SQLite-backed idempotency ledger.
//!
//! Remembers which tracks were already appended to which playlist, and
//! which tracks resolved to no genre. Records are only ever inserted;
//! inserting an existing record is a no-op reported as `false`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};

use crate::{Error, Result, debug};

const SCHEMA_VERSION: i64 = 1;

const PLAYLIST_TRACK_TABLE: &str = "CREATE TABLE IF NOT EXISTS playlist_track (
    id INTEGER PRIMARY KEY,
    playlist_id TEXT NOT NULL,
    track_id TEXT NOT NULL,
    created INTEGER DEFAULT (cast(strftime('%s','now') as int)),
    CONSTRAINT _uc_pid_tid UNIQUE (playlist_id, track_id)
)";

const GENRELESS_TRACK_TABLE: &str = "CREATE TABLE IF NOT EXISTS genreless_track (
    id INTEGER PRIMARY KEY,
    track_id TEXT NOT NULL,
    created INTEGER DEFAULT (cast(strftime('%s','now') as int)),
    CONSTRAINT _uc_tid UNIQUE (track_id)
)";

pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    /// Opens (and creates if needed) the ledger database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Self> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        if version < SCHEMA_VERSION {
            debug!("Creating ledger schema at version {}", SCHEMA_VERSION);
            let tx = conn.transaction()?;
            tx.execute(PLAYLIST_TRACK_TABLE, [])?;
            tx.execute(GENRELESS_TRACK_TABLE, [])?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LedgerLock)
    }

    /// Records that `track_id` was appended to `playlist_id`.
    ///
    /// Returns `true` if the record is new, `false` if it already existed.
    pub fn record_playlist_track(&self, playlist_id: &str, track_id: &str) -> Result<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO playlist_track (playlist_id, track_id) VALUES (?1, ?2)",
            params![playlist_id, track_id],
        )?;
        tx.commit()?;
        Ok(inserted == 1)
    }

    pub fn check_playlist_track_exists(&self, playlist_id: &str, track_id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM playlist_track WHERE playlist_id = ?1 AND track_id = ?2",
                params![playlist_id, track_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Records that `track_id` resolved to no genre.
    ///
    /// Returns `true` if the record is new, `false` if it already existed.
    pub fn record_genreless_track(&self, track_id: &str) -> Result<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO genreless_track (track_id) VALUES (?1)",
            params![track_id],
        )?;
        tx.commit()?;
        Ok(inserted == 1)
    }

    pub fn is_genreless(&self, track_id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM genreless_track WHERE track_id = ?1",
                params![track_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Number of recorded tracks per playlist id, ordered by playlist id.
    pub fn playlist_track_counts(&self) -> Result<Vec<(String, usize)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT playlist_id, COUNT(*) FROM playlist_track GROUP BY playlist_id ORDER BY playlist_id",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, usize>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn genreless_count(&self) -> Result<usize> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM genreless_track", [], |r| r.get(0))?)
    }
}

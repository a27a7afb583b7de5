//! Configuration management for genrelists.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{Error, Result};

pub const APP_DIR: &str = "genrelists";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SCOPE: &str = "user-library-read playlist-read-private playlist-modify-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_PACE_DELAY_SECS: u64 = 3;
pub const DEFAULT_PLAYLIST_PREFIX: &str = "Liked Songs:";

/// Returns the per-user data directory, e.g. `~/.local/share/genrelists`
/// on Linux or `%LOCALAPPDATA%/genrelists` on Windows.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Loads environment variables from `<data dir>/.env`.
///
/// Creates the data directory if needed. A missing `.env` file is not an
/// error, since every value may also come from the real environment.
pub async fn load_env() -> Result<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))
}

/// Runtime settings for a run of the CLI.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub server_address: String,
    pub pace_delay: Duration,
    pub playlist_prefix: String,
    pub ledger_path: PathBuf,
    pub token_path: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns the value of a
    /// variable or `None` when unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("{} must be set", key)))
        };

        let pace_delay = match get("PACE_DELAY_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("PACE_DELAY_SECS must be a number, got '{}'", raw))
            })?,
            None => DEFAULT_PACE_DELAY_SECS,
        };

        let ledger_path = get("LEDGER_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir().join("playlists.sqlite"));

        Ok(Self {
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            server_address: get("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            pace_delay: Duration::from_secs(pace_delay),
            playlist_prefix: get("PLAYLIST_PREFIX")
                .map(|p| p.trim().to_string())
                .unwrap_or_else(|| DEFAULT_PLAYLIST_PREFIX.to_string()),
            ledger_path,
            token_path: data_dir().join("cache/token.json"),
        })
    }
}

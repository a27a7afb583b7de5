//! Genre Playlists CLI Library
//!
//! This library turns a Spotify user's Liked Songs into one playlist per
//! genre. Re-running it is safe: every (playlist, track) pair that was
//! appended once is remembered in a local SQLite ledger and never sent
//! again.
//!
//! # Modules
//!
//! - `auth` - OAuth 2.0 PKCE flow and token persistence
//! - `builder` - The three-phase pipeline driving a run
//! - `cache` - Lazy fetch-on-miss caches for playlists, artists and albums
//! - `catalog` - Remote catalog client trait, Spotify implementation, pacing and pagination
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `ledger` - Persistent idempotency ledger
//! - `model` - Artist and album snapshots, URN formatting
//! - `playlist` - Playlists with a bounded pending-additions buffer
//! - `track` - Track resolution and genre derivation
//! - `types` - Spotify Web API payloads

use std::sync::atomic::{AtomicBool, Ordering};

pub mod auth;
pub mod builder;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod playlist;
pub mod track;
pub mod types;

pub use error::{Error, Result};

/// A convenient Result type alias for CLI level operations that may fail
/// with heterogeneous errors.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enables or disables output of the [`debug!`] macro.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

/// Returns whether [`debug!`] output is enabled.
pub fn verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Found {} genre playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a diagnostic message with a dimmed marker, only when verbose
/// output is enabled with [`set_verbose`].
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if $crate::verbose() {
      use colored::Colorize;
      println!("[{}] {}", "-".dimmed(), std::format_args!($($arg)*));
    }
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it is
/// only used at the CLI layer for unrecoverable errors.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

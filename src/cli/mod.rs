//! # CLI Module
//!
//! User-facing commands of genrelists. Each command loads what it needs
//! (settings, token, ledger), delegates to the library and reports the
//! outcome with the crate's output macros.
//!
//! - [`auth`] - Runs the Spotify OAuth 2.0 PKCE flow and stores the token
//! - [`build`] - Sorts the user's Liked Songs into genre playlists
//! - [`stats`] - Shows what the ledger has recorded so far
//!
//! ## Usage Patterns
//!
//! ```bash
//! genrelists auth                     # Authenticate with Spotify
//! genrelists build -u my-user         # Create or update genre playlists
//! genrelists stats                    # Inspect the ledger
//! ```

mod auth;
mod build;
mod stats;

pub use auth::auth;
pub use build::build;
pub use stats::stats;

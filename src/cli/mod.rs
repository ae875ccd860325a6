//! # CLI Module
//!
//! Command flows of Spotify Data Tools. Each flow opens a
//! [`CatalogSession`](crate::spotify::CatalogSession), either from a token
//! passed with `--token` or through the browser authorization, lets the user
//! pick playlists and hands the loaded tracks to the collaborator logic in
//! [`crate::management`].
//!
//! ## Commands
//!
//! - [`auth`] - Runs the browser authorization and prints the token
//! - [`backup`] - Exports playlists as tab-separated text or JSON
//! - [`duplicates`] - Lists similar track pairs of one playlist
//! - [`split`] - Splits a playlist by release decade or year added
//! - [`graph`] - Prints release and date-added histograms
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotify-data-tools auth                         # print a token
//! spotify-data-tools backup --format json --single all.json
//! spotify-data-tools backup --mine --check-duplicates -y
//! spotify-data-tools split --mode date-added --token BQC...
//! spotify-data-tools graph --compilations exclude
//! ```

mod auth;
mod backup;
mod duplicates;
mod graph;
pub mod prompt;
mod split;

pub use auth::auth;
pub use backup::{BackupOptions, backup};
pub use duplicates::{DuplicatesOptions, duplicates};
pub use graph::{GraphOptions, graph};
pub use split::{SplitOptions, split};

use crate::{config, spotify::CatalogSession, types::Token};

/// Session from an out-of-band token, or from the browser flow with `scope`.
pub async fn open_session(token: Option<String>, scope: &str) -> CatalogSession {
    match token {
        Some(token) => CatalogSession::from_token(Token::new(token)),
        None => CatalogSession::authorize(&config::spotify_client_id(), scope).await,
    }
}

//! Configuration management for Spotify Data Tools.
//!
//! Most values are compile-time constants: the identity provider only accepts
//! redirect URIs registered in advance, so the loopback address, port and
//! routes can never change at runtime. The few runtime settings are read from
//! environment variables, optionally loaded from a `.env` file:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

/// Fixed port of the loopback redirect listener.
pub const REDIRECT_PORT: u16 = 43019;

pub const REDIRECT_HOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

pub const REDIRECT_PATH: &str = "/redirect";

pub const TOKEN_PATH: &str = "/token";

pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1/";

/// Public client id registered with the redirect URI above.
pub const DEFAULT_CLIENT_ID: &str = "5c098bcc800e45d49e476265bc9b6934";

/// Attempts made for a single request before giving up.
pub const REQUEST_ATTEMPTS: u32 = 3;

pub const REQUEST_BACKOFF: Duration = Duration::from_secs(2);

/// Name of the pseudo playlist holding the user's liked songs.
pub const LIKES_PLAYLIST: &str = "Liked Songs";

/// Id given to the liked songs pseudo playlist.
pub const LIKES_ID: &str = "likes";

pub const ALBUM_TYPE_COMPILATION: &str = "compilation";

/// Maximum number of tracks added to a playlist per request.
pub const PLAYLIST_ADD_CHUNK: usize = 100;

pub const SCOPE_READ: &str = "user-library-read playlist-read-private playlist-read-collaborative";

pub const SCOPE_MODIFY: &str =
    "user-library-read playlist-read-private playlist-read-collaborative playlist-modify-private";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `spotify-data-tools/.env` in the platform-specific
/// local data directory (`~/.local/share` on Linux). The directory is created
/// if needed; a missing file is not an error since every setting has a
/// default.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify-data-tools/.env");
    path
}

/// Address the redirect listener binds to.
pub fn redirect_addr() -> SocketAddr {
    SocketAddr::from((REDIRECT_HOST, REDIRECT_PORT))
}

/// Redirect URI registered with the identity provider.
///
/// # Example
///
/// ```
/// assert_eq!(redirect_uri(), "http://127.0.0.1:43019/redirect");
/// ```
pub fn redirect_uri() -> String {
    format!(
        "http://{host}:{port}{path}",
        host = REDIRECT_HOST,
        port = REDIRECT_PORT,
        path = REDIRECT_PATH
    )
}

/// Returns the Spotify client id, from `SPOTIFY_CLIENT_ID` or the built-in default.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").unwrap_or_else(|_| DEFAULT_CLIENT_ID.to_string())
}

/// Returns the Web API base URL, from `SPOTIFY_API_URL` or the public endpoint.
///
/// A trailing slash is enforced so relative paths resolve below the version
/// segment (`https://api.spotify.com/v1/` + `me`).
pub fn spotify_api_url() -> String {
    let url = env::var("SPOTIFY_API_URL").unwrap_or_else(|_| SPOTIFY_API_URL.to_string());
    if url.ends_with('/') {
        url
    } else {
        format!("{url}/")
    }
}

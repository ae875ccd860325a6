//! Spotify Data Tools Library
//!
//! This library provides an authorized, paginated client for the Spotify Web
//! API together with the playlist tooling built on top of it: exporting
//! playlists, finding duplicate tracks, charting release years and splitting
//! playlists into new ones.
//!
//! # Modules
//!
//! - `api` - Route handlers of the loopback token capture server
//! - `cli` - Command-line flows
//! - `config` - Constants and environment configuration
//! - `error` - The crate error type
//! - `management` - Playlist discovery, loading and the collaborator logic
//! - `server` - Single-shot loopback listener capturing the access token
//! - `spotify` - Authorization flow, authorized client, paginator and session
//! - `types` - Data structures and typed views over API items
//! - `utils` - URL, selection and date helpers
//!
//! # Example
//!
//! ```
//! use spotify_data_tools::{spotify::CatalogSession, types::Token};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = CatalogSession::from_token(Token::new("BQC..."));
//!     let me = session.get("me", &[]).await;
//!     let playlists = session
//!         .list(&format!("users/{}/playlists", me["id"].as_str().unwrap_or_default()), &[("limit", "50")])
//!         .await;
//!     println!("{} playlists", playlists.len());
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for command flows that may fail.
///
/// Library layers return [`error::CatalogError`]; command flows mix in I/O
/// and prompt failures and use this boxed alias instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Returns the wall-clock timestamp prefixed to every log line.
#[doc(hidden)]
pub fn log_timestamp() -> String {
    chrono::Local::now().format("%I:%M:%S").to_string()
}

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading playlists...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] [{}] {}", $crate::log_timestamp(), "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Wrote file: {}", path);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] [{}] {}", $crate::log_timestamp(), "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Used for unrecoverable errors: exhausted request retries, a listener that
/// cannot bind its port, a malformed authorization redirect. The program
/// terminates with exit code 1, code after this will not execute.
///
/// # Example
///
/// ```
/// error!("Request to {} failed after {} attempts", url, attempts);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] [{}] {}", $crate::log_timestamp(), "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a failed request attempt that will be
/// retried or a track without data that is skipped.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser, navigate to {} manually", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] [{}] {}", $crate::log_timestamp(), "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

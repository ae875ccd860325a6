//! # Spotify Integration Module
//!
//! The access layer between the tools and the Spotify Web API. Every
//! downstream operation goes through the same three pieces:
//!
//! ```text
//! Collaborators (CLI flows, writers, charts)
//!          ↓   get / list / post
//! CatalogSession  ── composition root, fatal-exit policy
//!          ↓
//! Paginator       ── follows `next` links, flattens pages
//!          ↓
//! AuthorizedClient ── bearer header, URL resolution, bounded retry
//!          ↓
//! Transport (reqwest)
//! ```
//!
//! ## Authorization
//!
//! [`auth`] runs the OAuth implicit grant: it binds the loopback listener from
//! [`crate::server`] on the fixed redirect port, opens the browser at the
//! authorization URL and waits until the listener captured the token. A token
//! obtained out of band can be used directly with
//! [`CatalogSession::from_token`].
//!
//! ## Failure policy
//!
//! A single request is attempted up to three times with a fixed two second
//! pause. When every attempt fails the session logs the URL and the last
//! error and terminates the process: callers have no way to continue without
//! the data, so no partial result is ever handed out.
//!
//! ## Usage Patterns
//!
//! ```rust
//! let session = CatalogSession::authorize(&config::spotify_client_id(), config::SCOPE_READ).await;
//! let me = session.get("me", &[]).await;
//! let liked = session.list("me/tracks", &[("limit", "50")]).await;
//! ```

pub mod auth;
mod client;
mod paginate;
mod session;

pub use client::{ApiRequest, AuthorizedClient, HttpTransport, RetryPolicy, Transport};
pub use paginate::Paginator;
pub use session::CatalogSession;

//! # API Module
//!
//! Route handlers of the loopback token capture server.
//!
//! The identity provider delivers the access token of the implicit grant in
//! the URL fragment of the redirect. Browsers never send fragments to a
//! server, so the capture takes two hops:
//!
//! - [`redirect`] - serves a tiny page whose script reads `location.hash`
//!   and navigates to `/token?<fragment>`, turning the fragment into a query
//!   string the server can see.
//! - [`token`] - extracts `access_token` from that query string, answers with
//!   a "you may close this window" page and raises the completion signal held
//!   in [`CaptureState`].
//! - [`not_found`] - every other path; the listener keeps serving.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use spotify_data_tools::api::{self, CaptureState};
//!
//! let app = Router::new()
//!     .route("/redirect", get(api::redirect))
//!     .route("/token", get(api::token))
//!     .fallback(api::not_found)
//!     .layer(Extension(state));
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::server`] - listener lifecycle and shutdown
//! - [`crate::spotify::auth`] - builds the authorization URL and drives the flow

mod redirect;
mod token;

pub use redirect::{not_found, redirect};
pub use token::{CaptureState, captured_token, token};

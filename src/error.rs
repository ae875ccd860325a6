use std::{io, net::SocketAddr};

/// Errors raised by the authorization flow and the authorized client.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The loopback listener could not bind its fixed address.
    #[error("cannot bind redirect listener on {addr}: {source}")]
    PortBind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("redirect listener failed: {0}")]
    Listener(#[source] io::Error),

    /// The `/token` route was hit without a usable access token.
    #[error("malformed authorization redirect: {0}")]
    MalformedRedirect(String),

    #[error("invalid request target {target:?}: {reason}")]
    InvalidUrl { target: String, reason: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Every attempt of a single request failed.
    #[error("request to {url} failed after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        url: String,
        attempts: u32,
        last_error: Box<CatalogError>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

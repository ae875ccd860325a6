use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
};

use crate::{
    api::{self, CaptureState},
    config,
    error::CatalogError,
    types::Token,
};

/// Single-shot loopback listener capturing the implicit-grant access token.
///
/// Lifecycle: [`TokenCapture::bind`] claims the socket, [`TokenCapture::wait_for_token`]
/// serves requests until the token route fires its completion signal, then
/// stops accepting, drains the in-flight connection and drops the socket
/// before returning. A second capture on the same address cannot coexist with
/// a running one since the bind fails.
pub struct TokenCapture {
    listener: TcpListener,
    expected_state: Option<String>,
}

impl TokenCapture {
    /// Binds the listener. No retry and no fallback port: the redirect URI is
    /// fixed in the provider's allow-list.
    pub async fn bind(addr: SocketAddr) -> Result<Self, CatalogError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| CatalogError::PortBind { addr, source })?;

        Ok(TokenCapture {
            listener,
            expected_state: None,
        })
    }

    /// Requires the redirect to echo this `state` value.
    pub fn expect_state(mut self, state: impl Into<String>) -> Self {
        self.expected_state = Some(state.into());
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr, CatalogError> {
        self.listener.local_addr().map_err(CatalogError::Listener)
    }

    /// Serves the capture routes until the token route completes.
    ///
    /// Blocks for as long as the user takes in the browser; there is no
    /// timeout.
    pub async fn wait_for_token(self) -> Result<Token, CatalogError> {
        let (completion, signal) = oneshot::channel();
        let app = router(CaptureState::new(self.expected_state, completion));

        let outcome = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&outcome);

        // the listener moves into the serve future and is dropped when it ends
        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                let result = signal.await.unwrap_or_else(|_| {
                    Err(CatalogError::MalformedRedirect(
                        "capture ended without a token".to_string(),
                    ))
                });
                *slot.lock().await = Some(result);
            })
            .await
            .map_err(CatalogError::Listener)?;

        let result = outcome.lock().await.take();
        result.unwrap_or_else(|| {
            Err(CatalogError::MalformedRedirect(
                "capture ended without a token".to_string(),
            ))
        })
    }
}

fn router(state: CaptureState) -> Router {
    let redirect_subpaths = format!("{}/{{*rest}}", config::REDIRECT_PATH);

    Router::new()
        .route(config::REDIRECT_PATH, get(api::redirect))
        .route(&redirect_subpaths, get(api::redirect))
        .route(config::TOKEN_PATH, get(api::token))
        .fallback(api::not_found)
        .layer(Extension(state))
}

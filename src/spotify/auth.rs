use reqwest::Url;

use crate::{config, error::CatalogError, info, server::TokenCapture, types::Token, utils, warning};

/// Runs the interactive implicit-grant flow and returns the captured token.
///
/// 1. **Listener**: binds the loopback capture server on the fixed redirect
///    port. Fails immediately with [`CatalogError::PortBind`] if the port is
///    taken, there is no fallback port.
/// 2. **Browser**: opens the authorization URL. Failing to open the browser
///    only prints the URL for manual navigation.
/// 3. **Capture**: waits, without a timeout, until the browser delivered the
///    token to the listener. The listener socket is released before this
///    function returns, whatever the outcome.
///
/// # Example
///
/// ```
/// let token = authorize(&config::spotify_client_id(), config::SCOPE_READ).await?;
/// let session = CatalogSession::from_token(token);
/// ```
pub async fn authorize(client_id: &str, scope: &str) -> Result<Token, CatalogError> {
    let state = utils::generate_state();
    let capture = TokenCapture::bind(config::redirect_addr())
        .await?
        .expect_state(state.clone());

    let auth_url = authorization_url(client_id, scope, &state)?;
    info!("Opening browser for authorization...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let pb = utils::spinner("Waiting for authorization in the browser...");

    let token = capture.wait_for_token().await;
    pb.finish_and_clear();
    token
}

/// Builds the implicit-grant authorization URL.
///
/// # Example
///
/// ```
/// let url = authorization_url("abc", "playlist-read-private", "s7")?;
/// // https://accounts.spotify.com/authorize?response_type=token&client_id=abc&...
/// ```
pub fn authorization_url(client_id: &str, scope: &str, state: &str) -> Result<String, CatalogError> {
    let redirect_uri = config::redirect_uri();
    let url = Url::parse_with_params(
        config::SPOTIFY_AUTH_URL,
        &[
            ("response_type", "token"),
            ("client_id", client_id),
            ("scope", scope),
            ("redirect_uri", redirect_uri.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| CatalogError::InvalidUrl {
        target: config::SPOTIFY_AUTH_URL.to_string(),
        reason: e.to_string(),
    })?;

    Ok(url.into())
}

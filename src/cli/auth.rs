use crate::{config, error, spotify, success};

/// Runs the browser flow and prints the token for reuse with `--token`.
pub async fn auth() {
    match spotify::auth::authorize(&config::spotify_client_id(), config::SCOPE_MODIFY).await {
        Ok(token) => {
            success!("Authorization successful!");
            println!("{}", token.as_str());
        }
        Err(e) => error!("Authorization failed: {}", e),
    }
}

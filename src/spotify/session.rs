use serde_json::Value;

use crate::{error, error::CatalogError, success, types::Token};

use super::{AuthorizedClient, HttpTransport, Transport, auth};

/// Entry point of every tool talking to the Web API.
///
/// Hides where the token came from and applies the failure policy: a request
/// that exhausted its retries is logged and terminates the process, so the
/// forwarding methods below always hand back data.
pub struct CatalogSession<T = HttpTransport> {
    client: AuthorizedClient<T>,
}

impl CatalogSession {
    /// Wraps a token obtained out of band, no browser flow involved.
    pub fn from_token(token: Token) -> Self {
        Self::with_client(AuthorizedClient::new(token))
    }

    /// Obtains a token through the browser and wraps it.
    ///
    /// Exits the process if the redirect listener cannot bind its port or the
    /// redirect did not carry a token.
    pub async fn authorize(client_id: &str, scope: &str) -> Self {
        match auth::authorize(client_id, scope).await {
            Ok(token) => {
                success!("Authorization successful!");
                Self::from_token(token)
            }
            Err(e) => error!("Authorization failed: {}", e),
        }
    }
}

impl<T: Transport> CatalogSession<T> {
    pub fn with_client(client: AuthorizedClient<T>) -> Self {
        CatalogSession { client }
    }

    pub fn client(&self) -> &AuthorizedClient<T> {
        &self.client
    }

    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Value {
        match self.client.get(path, params).await {
            Ok(value) => value,
            Err(e) => fatal(e),
        }
    }

    pub async fn post(&self, path: &str, body: &Value) -> Value {
        match self.client.post(path, body).await {
            Ok(value) => value,
            Err(e) => fatal(e),
        }
    }

    pub async fn list(&self, path: &str, params: &[(&str, &str)]) -> Vec<Value> {
        match self.client.paginator().list(path, params).await {
            Ok(items) => items,
            Err(e) => fatal(e),
        }
    }
}

fn fatal(err: CatalogError) -> ! {
    error!("{}", err)
}

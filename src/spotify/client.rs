use std::{future::Future, time::Duration};

use reqwest::{Client, Method, header::AUTHORIZATION};
use serde_json::Value;
use tokio::time::sleep;

use crate::{config, error::CatalogError, types::Token, utils, warning};

use super::Paginator;

/// A fully resolved request, ready to be sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Value of the `Authorization` header.
    pub authorization: String,
    pub body: Option<Value>,
}

/// Executes one HTTP attempt and decodes the JSON body.
///
/// Any failure (connection, non-2xx status, undecodable body) is reported as
/// an error; retrying is left to [`AuthorizedClient`].
pub trait Transport {
    fn execute(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<Value, CatalogError>> + Send;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, CatalogError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(AUTHORIZATION, &request.authorization);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        // 204 and friends carry no body
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Bounded retry with a fixed pause between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: config::REQUEST_ATTEMPTS,
            backoff: config::REQUEST_BACKOFF,
        }
    }
}

/// Performs authenticated requests against the Web API.
///
/// Owns the bearer token for its whole lifetime. Targets are either absolute
/// URLs (as found in `next` and `href` fields) or paths relative to the API
/// base URL; query parameters are appended with `?` or `&` as needed.
pub struct AuthorizedClient<T = HttpTransport> {
    token: Token,
    base_url: String,
    retry: RetryPolicy,
    transport: T,
}

impl AuthorizedClient {
    pub fn new(token: Token) -> Self {
        Self::with_transport(token, HttpTransport::new())
    }
}

impl<T: Transport> AuthorizedClient<T> {
    pub fn with_transport(token: Token, transport: T) -> Self {
        AuthorizedClient {
            token,
            base_url: config::spotify_api_url(),
            retry: RetryPolicy::default(),
            transport,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves a target and its query parameters into the outgoing URL.
    pub fn resolve(&self, target: &str, params: &[(&str, &str)]) -> Result<String, CatalogError> {
        utils::resolve_url(&self.base_url, target, params)
    }

    pub async fn get(&self, target: &str, params: &[(&str, &str)]) -> Result<Value, CatalogError> {
        self.request(Method::GET, target, params, None).await
    }

    pub async fn post(&self, target: &str, body: &Value) -> Result<Value, CatalogError> {
        self.request(Method::POST, target, &[], Some(body)).await
    }

    pub fn paginator(&self) -> Paginator<'_, T> {
        Paginator::new(self)
    }

    /// Sends one request, retrying failed attempts.
    ///
    /// Every failed attempt is logged. After `max_attempts` failures the last
    /// error is returned wrapped in [`CatalogError::ExhaustedRetries`]. A
    /// target that cannot be resolved is returned at once, it would fail the
    /// same way on every attempt.
    pub async fn request(
        &self,
        method: Method,
        target: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, CatalogError> {
        let request = ApiRequest {
            method,
            url: self.resolve(target, params)?,
            authorization: self.token.bearer(),
            body: body.cloned(),
        };
        let attempts = self.retry.max_attempts.max(1);

        let mut attempt = 1;
        loop {
            match self.transport.execute(&request).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warning!(
                        "{} {} failed (attempt {}/{}): {}",
                        request.method,
                        request.url,
                        attempt,
                        attempts,
                        err
                    );

                    if attempt >= attempts {
                        return Err(CatalogError::ExhaustedRetries {
                            url: request.url,
                            attempts,
                            last_error: Box::new(err),
                        });
                    }

                    sleep(self.retry.backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}

#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::Mutex,
    time::Duration,
};

use serde_json::Value;
use spotify_data_tools::{
    error::CatalogError,
    spotify::{ApiRequest, AuthorizedClient, RetryPolicy, Transport},
    types::Token,
};

pub const BASE_URL: &str = "https://api.example.com/v1/";

/// Transport answering from fixed routes first, then from a scripted queue.
/// Requests hitting neither fail like a refused connection.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Value>,
    script: Mutex<VecDeque<Result<Value, CatalogError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn scripted(script: Vec<Result<Value, CatalogError>>) -> Self {
        MockTransport {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    pub fn routes(routes: Vec<(String, Value)>) -> Self {
        MockTransport {
            routes: routes.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, CatalogError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(value) = self.routes.get(&request.url) {
            return Ok(value.clone());
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(failure()))
    }
}

pub fn failure() -> CatalogError {
    CatalogError::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"))
}

pub fn client(transport: MockTransport) -> AuthorizedClient<MockTransport> {
    AuthorizedClient::with_transport(Token::new("test-token"), transport)
        .base_url(BASE_URL)
        .retry_policy(RetryPolicy {
            max_attempts: 3,
            backoff: Duration::ZERO,
        })
}

pub fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

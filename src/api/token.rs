use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::{Mutex, oneshot};

use crate::{error::CatalogError, types::Token};

type Completion = oneshot::Sender<Result<Token, CatalogError>>;

/// Shared state of the capture routes.
///
/// Holds the single-slot completion channel: the first hit of the token route
/// takes the sender and fires it, later hits find the slot empty.
#[derive(Clone)]
pub struct CaptureState {
    expected_state: Option<String>,
    completion: Arc<Mutex<Option<Completion>>>,
}

impl CaptureState {
    pub fn new(expected_state: Option<String>, completion: Completion) -> Self {
        CaptureState {
            expected_state,
            completion: Arc::new(Mutex::new(Some(completion))),
        }
    }

    async fn complete(&self, outcome: Result<Token, CatalogError>) {
        if let Some(sender) = self.completion.lock().await.take() {
            // the receiver only goes away once the listener is shutting down
            let _ = sender.send(outcome);
        }
    }
}

pub async fn token(
    Query(params): Query<HashMap<String, String>>,
    Extension(capture): Extension<CaptureState>,
) -> Html<&'static str> {
    let outcome = captured_token(&params, capture.expected_state.as_deref());
    let page = match outcome {
        Ok(_) => "<h2>Authorization successful.</h2><p>You may close this window.</p>",
        Err(_) => "<h4>Authorization failed.</h4><p>Check the terminal for details.</p>",
    };

    capture.complete(outcome).await;
    Html(page)
}

/// Extracts the access token from the forwarded redirect parameters.
///
/// Fails when the provider reported an error, when `state` does not match the
/// value sent with the authorization request or when `access_token` is
/// missing.
pub fn captured_token(
    params: &HashMap<String, String>,
    expected_state: Option<&str>,
) -> Result<Token, CatalogError> {
    if let Some(error) = params.get("error") {
        return Err(CatalogError::MalformedRedirect(format!(
            "authorization denied: {error}"
        )));
    }

    if let Some(expected) = expected_state {
        if params.get("state").map(String::as_str) != Some(expected) {
            return Err(CatalogError::MalformedRedirect(
                "state does not match the authorization request".to_string(),
            ));
        }
    }

    match params.get("access_token") {
        Some(access_token) if !access_token.is_empty() => Ok(Token::new(access_token.clone())),
        _ => Err(CatalogError::MalformedRedirect(
            "access_token missing from redirect".to_string(),
        )),
    }
}

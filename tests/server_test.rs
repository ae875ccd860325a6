use std::net::SocketAddr;

use spotify_data_tools::{error::CatalogError, server::TokenCapture};

fn any_port() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_captures_token_and_releases_socket() {
    let capture = TokenCapture::bind(any_port()).await.unwrap();
    let addr = capture.local_addr().unwrap();
    let waiting = tokio::spawn(capture.wait_for_token());
    let client = http();

    let page = client
        .get(format!("http://{addr}/redirect"))
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), 200);
    let body = page.text().await.unwrap();
    assert!(body.contains("location.hash"));
    assert!(body.contains("/token?"));

    let done = client
        .get(format!(
            "http://{addr}/token?access_token=BQC123&token_type=Bearer&expires_in=3600"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(done.status(), 200);
    assert!(done.text().await.unwrap().contains("close this window"));

    let token = waiting.await.unwrap().unwrap();
    assert_eq!(token.as_str(), "BQC123");

    // the listener is gone once the token was captured
    let again = http()
        .get(format!("http://{addr}/token?access_token=other"))
        .send()
        .await;
    assert!(again.is_err());
}

#[tokio::test]
async fn test_unknown_paths_do_not_end_capture() {
    let capture = TokenCapture::bind(any_port()).await.unwrap();
    let addr = capture.local_addr().unwrap();
    let waiting = tokio::spawn(capture.wait_for_token());
    let client = http();

    let missing = client
        .get(format!("http://{addr}/favicon.ico"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    let nested = client
        .get(format!("http://{addr}/redirect/extra"))
        .send()
        .await
        .unwrap();
    assert_eq!(nested.status(), 200);
    assert!(!waiting.is_finished());

    client
        .get(format!("http://{addr}/token?access_token=xyz"))
        .send()
        .await
        .unwrap();
    assert_eq!(waiting.await.unwrap().unwrap().as_str(), "xyz");
}

#[tokio::test]
async fn test_state_mismatch_fails_capture() {
    let capture = TokenCapture::bind(any_port())
        .await
        .unwrap()
        .expect_state("expected");
    let addr = capture.local_addr().unwrap();
    let waiting = tokio::spawn(capture.wait_for_token());

    let res = http()
        .get(format!("http://{addr}/token?access_token=abc&state=forged"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let err = waiting.await.unwrap().unwrap_err();
    assert!(matches!(err, CatalogError::MalformedRedirect(_)));
}

#[tokio::test]
async fn test_denied_authorization_fails_capture() {
    let capture = TokenCapture::bind(any_port()).await.unwrap();
    let addr = capture.local_addr().unwrap();
    let waiting = tokio::spawn(capture.wait_for_token());

    http()
        .get(format!("http://{addr}/token?error=access_denied"))
        .send()
        .await
        .unwrap();

    let err = waiting.await.unwrap().unwrap_err();
    assert!(err.to_string().contains("access_denied"));
}

#[tokio::test]
async fn test_port_in_use_fails_fast() {
    let taken = std::net::TcpListener::bind(any_port()).unwrap();
    let addr = taken.local_addr().unwrap();

    let err = TokenCapture::bind(addr).await.err().unwrap();

    assert!(matches!(err, CatalogError::PortBind { addr: a, .. } if a == addr));
}

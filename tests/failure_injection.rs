//! Failure injection tests for the forwarding retry loop.

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use roproxy::config::ProxyConfig;

mod common;
use common::{Outcome, ScriptedTransport};

fn config_with_retries(retries: u32) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.upstream.max_retries = retries;
    config.upstream.timeout_seconds = 1;
    config
}

#[tokio::test]
async fn test_retry_on_transport_failure() {
    let transport = ScriptedTransport::sequence(vec![
        Outcome::Fail,
        Outcome::Fail,
        Outcome::Respond {
            status: 200,
            headers: vec![("x-served-by", "upstream")],
            body: "Success",
        },
    ]);
    let (addr, shutdown) = common::start_proxy(config_with_retries(5), transport.clone()).await;

    let res = common::client()
        .get(format!("http://{}/games/v1/games?universeIds=1", addr))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::OK, "Should eventually succeed after retries");
    assert_eq!(res.headers().get("x-served-by").unwrap(), "upstream");
    assert_eq!(res.text().await.unwrap(), "Success");
    assert_eq!(transport.calls(), 3, "Should have attempted 3 times");

    // Every attempt targets the same URL.
    for request in transport.requests() {
        assert_eq!(request.uri, "https://games.roblox.com/v1/games?universeIds=1");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_exhaustion_returns_synthetic_500() {
    let transport = ScriptedTransport::always(Outcome::Fail);
    let (addr, shutdown) = common::start_proxy(config_with_retries(3), transport.clone()).await;

    let res = common::client()
        .get(format!("http://{}/users/1", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), "Proxy failed to connect. Please try again.");
    assert_eq!(transport.calls(), 3, "Never more than max_retries upstream calls");

    shutdown.trigger();
}

#[tokio::test]
async fn test_last_attempt_can_succeed() {
    let transport = ScriptedTransport::sequence(vec![
        Outcome::Fail,
        Outcome::Fail,
        Outcome::ok("finally"),
    ]);
    let (addr, shutdown) = common::start_proxy(config_with_retries(3), transport.clone()).await;

    let res = common::client()
        .get(format!("http://{}/home", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "finally");
    assert_eq!(transport.calls(), 3);

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_server_error_not_retried() {
    let transport = ScriptedTransport::always(Outcome::status(503, "Service Unavailable"));
    let (addr, shutdown) = common::start_proxy(config_with_retries(5), transport.clone()).await;

    let res = common::client()
        .get(format!("http://{}/economy/v1/currency", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.text().await.unwrap(), "Service Unavailable");
    assert_eq!(transport.calls(), 1, "Upstream status codes must not trigger a retry");

    shutdown.trigger();
}

#[tokio::test]
async fn test_timeout_counts_as_failed_attempt() {
    let transport = ScriptedTransport::sequence(vec![Outcome::Hang, Outcome::ok("after timeout")]);
    let (addr, shutdown) = common::start_proxy(config_with_retries(2), transport.clone()).await;

    let start = Instant::now();
    let res = common::client()
        .get(format!("http://{}/thumbnails/v1/assets", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "after timeout");
    assert_eq!(transport.calls(), 2);
    assert!(start.elapsed() >= Duration::from_secs(1), "First attempt should wait out its deadline");

    shutdown.trigger();
}

#[tokio::test]
async fn test_body_resent_on_every_attempt() {
    let transport = ScriptedTransport::sequence(vec![Outcome::Fail, Outcome::ok("ok")]);
    let (addr, shutdown) = common::start_proxy(config_with_retries(2), transport.clone()).await;

    common::client()
        .put(format!("http://{}/accountsettings/v1/email", addr))
        .body("new@example.com")
        .send()
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.method, "PUT");
        assert_eq!(&request.body[..], b"new@example.com");
    }

    shutdown.trigger();
}

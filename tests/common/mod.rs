//! Shared utilities for integration and load testing.

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode, Uri};
use roproxy::config::ProxyConfig;
use roproxy::upstream::{Transport, TransportError, UpstreamResponse};
use roproxy::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// What the fake upstream does for one attempt.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Outcome {
    /// Transport-level failure.
    Fail,
    /// Never answers; the attempt deadline has to fire.
    Hang,
    Respond {
        status: u16,
        headers: Vec<(&'static str, &'static str)>,
        body: &'static str,
    },
}

#[allow(dead_code)]
impl Outcome {
    pub fn ok(body: &'static str) -> Self {
        Outcome::Respond {
            status: 200,
            headers: Vec::new(),
            body,
        }
    }

    pub fn status(status: u16, body: &'static str) -> Self {
        Outcome::Respond {
            status,
            headers: Vec::new(),
            body,
        }
    }
}

/// An upstream request as the transport saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// In-memory transport that plays back a script of outcomes and records
/// every request it receives.
#[derive(Clone)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Outcome>>>,
    after_script: Outcome,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    /// Play `script` in order, then fail every further attempt.
    pub fn sequence(script: Vec<Outcome>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            after_script: Outcome::Fail,
            seen: Arc::default(),
        }
    }

    /// Play `script` in order, then answer every further attempt with `then`.
    pub fn sequence_then(script: Vec<Outcome>, then: Outcome) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            after_script: then,
            seen: Arc::default(),
        }
    }

    /// Answer every attempt with `outcome`.
    pub fn always(outcome: Outcome) -> Self {
        Self {
            script: Arc::default(),
            after_script: outcome,
            seen: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        request: Request<Body>,
    ) -> impl Future<Output = Result<UpstreamResponse, TransportError>> + Send {
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.after_script.clone());
        let seen = self.seen.clone();

        async move {
            let (parts, body) = request.into_parts();
            let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
            seen.lock().unwrap().push(Recorded {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            });

            match outcome {
                Outcome::Fail => Err(TransportError::TimedOut(Duration::ZERO)),
                Outcome::Hang => std::future::pending().await,
                Outcome::Respond {
                    status,
                    headers,
                    body,
                } => {
                    let mut map = HeaderMap::new();
                    for (name, value) in headers {
                        map.append(
                            HeaderName::from_static(name),
                            HeaderValue::from_static(value),
                        );
                    }
                    Ok(UpstreamResponse {
                        status: StatusCode::from_u16(status).unwrap(),
                        headers: map,
                        body: Bytes::from_static(body.as_bytes()),
                    })
                }
            }
        }
    }
}

/// Boot the proxy on an ephemeral port with `transport` as its upstream.
pub async fn start_proxy(config: ProxyConfig, transport: ScriptedTransport) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::with_transport(config, transport);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

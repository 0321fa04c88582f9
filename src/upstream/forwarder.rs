//! Resilient forwarding of one inbound request.

use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, Uri},
};

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::http::request::InboundRequest;
use crate::observability::metrics;
use crate::resilience::{timeouts, AttemptState, RetryPolicy};
use crate::routing::TargetDescriptor;
use crate::security::outbound_headers;
use crate::upstream::client::{Transport, UpstreamResponse};

/// Sends requests upstream through a shared [`Transport`], retrying
/// transport failures up to the configured bound.
#[derive(Clone)]
pub struct ForwardingClient<T> {
    transport: T,
    policy: RetryPolicy,
    timeout: Duration,
    user_agent: HeaderValue,
}

impl<T: Transport> ForwardingClient<T> {
    pub fn new(transport: T, config: &UpstreamConfig) -> Self {
        // Validation rejects agents that are not valid header values.
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("RoProxy"));

        Self {
            transport,
            policy: RetryPolicy::new(config.max_retries),
            timeout: config.timeout(),
            user_agent,
        }
    }

    /// Forward `request` to `target`. Any upstream response, whatever its
    /// status, ends the loop; only transport errors are retried.
    pub async fn forward(
        &self,
        request: &InboundRequest,
        target: &TargetDescriptor,
    ) -> Result<UpstreamResponse, ProxyError> {
        let uri = target.to_uri()?;
        let headers = outbound_headers(&request.headers, &self.user_agent);

        let mut state = self.policy.start();
        loop {
            state = match state {
                AttemptState::Attempting(attempt) => {
                    let upstream = build_upstream_request(request, &uri, &headers);
                    match timeouts::bounded(self.timeout, self.transport.send(upstream)).await {
                        Ok(response) => AttemptState::Succeeded(response),
                        Err(error) => {
                            tracing::warn!(
                                attempt,
                                max_attempts = self.policy.max_attempts(),
                                target = %target,
                                error = %error,
                                "Upstream request failed"
                            );
                            metrics::record_upstream_failure();
                            self.policy.after_failure(attempt)
                        }
                    }
                }
                AttemptState::Succeeded(response) => return Ok(response),
                AttemptState::Failed { attempts } => {
                    tracing::error!(attempts, target = %target, "Forwarding attempts exhausted");
                    metrics::record_exhausted();
                    return Err(ProxyError::ForwardingExhausted {
                        target: target.to_string(),
                        attempts,
                    });
                }
            };
        }
    }
}

fn build_upstream_request(request: &InboundRequest, uri: &Uri, headers: &HeaderMap) -> Request<Body> {
    let mut upstream = Request::new(Body::from(request.body.clone()));
    *upstream.method_mut() = request.method.clone();
    *upstream.uri_mut() = uri.clone();
    *upstream.headers_mut() = headers.clone();
    upstream
}

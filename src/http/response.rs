//! Response relay.
//!
//! # Responsibilities
//! - Copy the upstream status and body onto the outbound response
//! - Copy every upstream header, replacing same-named outbound headers
//!
//! # Design Decisions
//! - Caching, CORS and cookie headers pass through untouched
//! - Repeated upstream headers (e.g. `Set-Cookie`) keep every value
//! - The body is already buffered, so upstream framing headers that no
//!   longer describe it are dropped and hyper frames the response itself

use axum::{
    body::Body,
    http::{header, HeaderMap},
    response::Response,
};

use crate::upstream::UpstreamResponse;

/// Build the caller's response from an upstream response.
pub fn relay(upstream: UpstreamResponse) -> Response {
    let UpstreamResponse {
        status,
        mut headers,
        body,
    } = upstream;
    strip_stale_framing(&mut headers, body.len());

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    copy_headers(&headers, response.headers_mut());
    response
}

/// Remove `Transfer-Encoding`, and any `Content-Length` that disagrees with
/// the buffered body. An empty body keeps its `Content-Length`, which is
/// meaningful for `HEAD` and `304` responses.
fn strip_stale_framing(headers: &mut HeaderMap, body_len: usize) {
    headers.remove(header::TRANSFER_ENCODING);

    if body_len == 0 {
        return;
    }
    let stale = headers.get_all(header::CONTENT_LENGTH).iter().any(|value| {
        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            != Some(body_len)
    });
    if stale {
        headers.remove(header::CONTENT_LENGTH);
    }
}

/// Copy every header of `from` onto `to`. Names present in `from` replace
/// whatever `to` held for them.
pub fn copy_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for name in from.keys() {
        to.remove(name);
        for value in from.get_all(name) {
            to.append(name.clone(), value.clone());
        }
    }
}

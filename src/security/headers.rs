//! Header manipulation for upstream requests.
//!
//! # Responsibilities
//! - Copy the caller's headers onto the upstream request
//! - Drop `Host` and `PROXYKEY` (the upstream host comes from the target URL)
//! - Strip hop-by-hop headers
//! - Stamp a fixed `User-Agent` and remove caller-supplied `Roblox-Id`
//!
//! # Design Decisions
//! - `HeaderMap` is the case-insensitive ordered multimap; repeated values are
//!   preserved in order
//! - Exclusions live in one table instead of being scattered through forwarding

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

use crate::security::auth::PROXY_KEY_HEADER;

/// Trust-sensitive header that callers may never forward.
pub const ROBLOX_ID_HEADER: &str = "roblox-id";

/// Connection-scoped headers that must not cross the proxy.
const HOP_BY_HOP: [HeaderName; 5] = [
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

fn is_excluded(name: &HeaderName) -> bool {
    *name == header::HOST
        || name.as_str() == PROXY_KEY_HEADER
        || name.as_str() == "keep-alive"
        || name.as_str() == "proxy-connection"
        || HOP_BY_HOP.contains(name)
}

/// Build the header set for one upstream attempt.
pub fn outbound_headers(inbound: &HeaderMap, user_agent: &HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len() + 1);
    for (name, value) in inbound {
        if is_excluded(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    headers.insert(header::USER_AGENT, user_agent.clone());
    headers.remove(ROBLOX_ID_HEADER);
    headers
}

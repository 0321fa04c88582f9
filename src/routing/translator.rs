//! Target lookup.
//!
//! # Responsibilities
//! - Hold the compiled rule list
//! - Map a trimmed path plus query string onto exactly one upstream URL
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins; the subdomain fallback terminates every lookup
//! - Query strings are appended verbatim, whichever rule matched

use std::fmt;

use axum::http::Uri;

use crate::error::ProxyError;
use crate::routing::rules::{
    RequestPath, Rule, SubdomainRule, UserShortcutRule, VersionedUsersRule,
};

/// Origin whose subdomains every request is forwarded to.
pub const DEFAULT_ORIGIN: &str = "roblox.com";

/// The upstream URL computed for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor(String);

impl TargetDescriptor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a request URI. Fails for paths whose first segment is not
    /// a usable host label.
    pub fn to_uri(&self) -> Result<Uri, ProxyError> {
        self.0
            .parse::<Uri>()
            .map_err(|_| ProxyError::MalformedPath(self.0.clone()))
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered rule set mapping request paths onto upstream URLs.
#[derive(Debug)]
pub struct PathTranslator {
    rules: Vec<Box<dyn Rule>>,
    fallback: SubdomainRule,
}

impl PathTranslator {
    pub fn new(origin: &str) -> Self {
        Self {
            rules: vec![
                Box::new(UserShortcutRule::new(origin)),
                Box::new(VersionedUsersRule::new(origin)),
            ],
            fallback: SubdomainRule::new(origin),
        }
    }

    /// `path` must already be trimmed of leading and trailing `/` and non-empty.
    pub fn translate(&self, path: &str, query: Option<&str>) -> TargetDescriptor {
        let path = RequestPath::new(path);
        let mut url = self
            .rules
            .iter()
            .find_map(|rule| rule.rewrite(&path))
            .unwrap_or_else(|| self.fallback.target(&path));

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        TargetDescriptor(url)
    }
}

impl Default for PathTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

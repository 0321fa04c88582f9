//! Path rewrite rules.
//!
//! # Responsibilities
//! - Recognize the `users/<id>` shortcut
//! - Recognize versioned users API paths (`v<digits>/users/...`)
//! - Map everything else onto `<subdomain>.<origin>/<rest>`
//!
//! # Design Decisions
//! - Each rule inspects the trimmed path and returns a URL or declines
//! - Segment comparisons are case-sensitive
//! - The subdomain fallback always matches, so rule lists end with it

/// Trimmed request path split into its `/`-separated segments.
#[derive(Debug, Clone, Copy)]
pub struct RequestPath<'a> {
    raw: &'a str,
}

impl<'a> RequestPath<'a> {
    /// Wrap an already trimmed, non-empty path.
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    pub fn segments(&self) -> Vec<&'a str> {
        self.raw.split('/').collect()
    }
}

/// A single rewrite rule producing an upstream URL (without query string).
pub trait Rule: Send + Sync + std::fmt::Debug {
    fn rewrite(&self, path: &RequestPath<'_>) -> Option<String>;
}

/// Returns true for `v` followed by a non-negative integer that fits in an
/// `i64` (`v1`, `v20`). Signs are not accepted.
pub fn is_version_segment(segment: &str) -> bool {
    match segment.strip_prefix('v') {
        Some(digits) => {
            !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
                && digits.parse::<i64>().is_ok()
        }
        None => false,
    }
}

/// `users/<id>` → `https://users.<origin>/v1/users/<id>`.
#[derive(Debug, Clone)]
pub struct UserShortcutRule {
    origin: String,
}

impl UserShortcutRule {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

impl Rule for UserShortcutRule {
    fn rewrite(&self, path: &RequestPath<'_>) -> Option<String> {
        match path.segments().as_slice() {
            ["users", id] if !id.is_empty() => {
                Some(format!("https://users.{}/v1/users/{}", self.origin, id))
            }
            _ => None,
        }
    }
}

/// `v<n>/users/...` (three or more segments) → `https://users.<origin>/<path>`.
#[derive(Debug, Clone)]
pub struct VersionedUsersRule {
    origin: String,
}

impl VersionedUsersRule {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

impl Rule for VersionedUsersRule {
    fn rewrite(&self, path: &RequestPath<'_>) -> Option<String> {
        let segments = path.segments();
        if segments.len() >= 3 && is_version_segment(segments[0]) && segments[1] == "users" {
            Some(format!("https://users.{}/{}", self.origin, path.as_str()))
        } else {
            None
        }
    }
}

/// `<sub>/<rest>` → `https://<sub>.<origin>/<rest>`; a lone segment goes to `www`.
#[derive(Debug, Clone)]
pub struct SubdomainRule {
    origin: String,
}

impl SubdomainRule {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// Never declines.
    pub fn target(&self, path: &RequestPath<'_>) -> String {
        match path.as_str().split_once('/') {
            Some((subdomain, rest)) => format!("https://{}.{}/{}", subdomain, self.origin, rest),
            None => format!("https://www.{}/{}", self.origin, path.as_str()),
        }
    }
}

impl Rule for SubdomainRule {
    fn rewrite(&self, path: &RequestPath<'_>) -> Option<String> {
        Some(self.target(path))
    }
}

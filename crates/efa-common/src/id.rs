//! Version and locale identifiers taken from request paths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Documentation version identifier.
///
/// Examples: `free-pro-team@latest`, `enterprise-server@3.9`, `v1`.
/// Only `[A-Za-z0-9._@-]` is accepted so the value is safe to echo in
/// paths and markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub String);

impl VersionId {
    /// Parse a path segment into a version id.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || s.len() > 128 {
            return None;
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '-'))
        {
            return None;
        }
        Some(VersionId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check whether a path segment looks like a locale tag (`en`, `pt`, `zh-cn`).
pub fn is_locale_tag(s: &str) -> bool {
    (2..=10).contains(&s.len())
        && s.chars().all(|c| c.is_ascii_lowercase() || c == '-')
        && !s.starts_with('-')
        && !s.ends_with('-')
}

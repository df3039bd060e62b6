//! URL routing for the page server.
//!
//! ```text
//! /<locale>/<version>/rest/overview/endpoints-available-for-github-apps
//! /<version>/rest/overview/endpoints-available-for-github-apps
//! /health, /healthz
//! ```
//!
//! Locale and version segments are percent-decoded before use.

/// Path segments that follow the version id.
pub const PAGE_SUFFIX: [&str; 3] = ["rest", "overview", "endpoints-available-for-github-apps"];

/// A request for the availability page, before context resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Request path without query string.
    pub path: String,
    /// Locale segment, when the path carries one.
    pub locale: Option<String>,
    /// Raw version segment.
    pub version: String,
    /// Raw query string, if any.
    pub query: Option<String>,
}

impl PageRequest {
    /// Build a request for a version directly (CLI rendering).
    pub fn for_version(version: impl Into<String>, locale: Option<String>) -> Self {
        let version = version.into();
        let path = match &locale {
            Some(locale) => format!("/{}/{}/{}", locale, version, PAGE_SUFFIX.join("/")),
            None => format!("/{}/{}", version, PAGE_SUFFIX.join("/")),
        };
        Self {
            path,
            locale,
            version,
            query: None,
        }
    }

    /// Value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == key).then_some(v)
        })
    }
}

/// Result of matching a request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(PageRequest),
    Health,
    MethodNotAllowed,
    NotFound,
}

/// Match a method and URL to a route.
pub fn route(method: &str, url: &str) -> Route {
    if !matches!(method, "GET" | "HEAD") {
        return Route::MethodNotAllowed;
    }

    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, Some(q.to_string())),
        None => (url, None),
    };

    if path == "/health" || path == "/healthz" {
        return Route::Health;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let (locale, version) = match segments.len() {
        4 if segments[1..] == PAGE_SUFFIX => (None, segments[0]),
        5 if segments[2..] == PAGE_SUFFIX => (Some(segments[0]), segments[1]),
        _ => return Route::NotFound,
    };

    let locale = match locale.map(decode_segment) {
        Some(None) => return Route::NotFound,
        decoded => decoded.flatten(),
    };
    let Some(version) = decode_segment(version) else {
        return Route::NotFound;
    };

    Route::Page(PageRequest {
        path: path.to_string(),
        locale,
        version,
        query,
    })
}

/// Percent-decode one path segment. `None` if it does not decode to UTF-8.
fn decode_segment(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "rest/overview/endpoints-available-for-github-apps";

    #[test]
    fn test_route_with_locale() {
        let url = format!("/en/free-pro-team@latest/{}", PAGE);
        match route("GET", &url) {
            Route::Page(req) => {
                assert_eq!(req.locale.as_deref(), Some("en"));
                assert_eq!(req.version, "free-pro-team@latest");
                assert_eq!(req.query, None);
            }
            other => panic!("expected page, got {:?}", other),
        }
    }

    #[test]
    fn test_route_without_locale() {
        let url = format!("/enterprise-server@3.9/{}/", PAGE);
        match route("HEAD", &url) {
            Route::Page(req) => {
                assert_eq!(req.locale, None);
                assert_eq!(req.version, "enterprise-server@3.9");
            }
            other => panic!("expected page, got {:?}", other),
        }
    }

    #[test]
    fn test_query_string_split() {
        let url = format!("/en/v1/{}?format=json&x=1", PAGE);
        let Route::Page(req) = route("GET", &url) else {
            panic!("expected page");
        };
        assert_eq!(req.path, format!("/en/v1/{}", PAGE));
        assert_eq!(req.query_param("format"), Some("json"));
        assert_eq!(req.query_param("x"), Some("1"));
        assert_eq!(req.query_param("y"), None);
    }

    #[test]
    fn test_health_and_unknown() {
        assert_eq!(route("GET", "/healthz"), Route::Health);
        assert_eq!(route("GET", "/health?probe=1"), Route::Health);
        assert_eq!(route("GET", "/"), Route::NotFound);
        assert_eq!(route("GET", "/en/v1/rest/overview/other"), Route::NotFound);
        assert_eq!(route("POST", "/healthz"), Route::MethodNotAllowed);
    }

    #[test]
    fn test_encoded_segments_decoded() {
        let url = format!("/en/free-pro-team%40latest/{}", PAGE);
        let Route::Page(req) = route("GET", &url) else {
            panic!("expected page");
        };
        assert_eq!(req.version, "free-pro-team@latest");
        assert_eq!(req.locale.as_deref(), Some("en"));

        let url = format!("/%7A%68-cn/enterprise-server%403.9/{}", PAGE);
        let Route::Page(req) = route("GET", &url) else {
            panic!("expected page");
        };
        assert_eq!(req.locale.as_deref(), Some("zh-cn"));
        assert_eq!(req.version, "enterprise-server@3.9");
    }

    #[test]
    fn test_invalid_utf8_segment_not_found() {
        let url = format!("/en/v%FF1/{}", PAGE);
        assert_eq!(route("GET", &url), Route::NotFound);
    }

    #[test]
    fn test_for_version_builds_path() {
        let req = PageRequest::for_version("v1", Some("en".into()));
        assert_eq!(req.path, format!("/en/v1/{}", PAGE));
        assert_eq!(route("GET", &req.path), Route::Page(req));
    }
}

//! Link targets for reference pages.

/// Builds localized hrefs to REST reference pages.
///
/// Injected into [`render`](crate::render) so the renderer never needs to
/// know how the host site lays out its URLs.
pub trait LinkBuilder: Send + Sync {
    /// Href of the reference page for one category.
    fn reference_href(&self, locale: &str, category: &str) -> String;

    /// Href of one operation on its category's reference page.
    fn operation_href(&self, locale: &str, category: &str, slug: &str) -> String {
        format!("{}#{}", self.reference_href(locale, category), slug)
    }
}

/// Default layout: `/<locale>/rest/reference/<category>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceLinks;

impl LinkBuilder for ReferenceLinks {
    fn reference_href(&self, locale: &str, category: &str) -> String {
        format!("/{}/rest/reference/{}", locale, category)
    }
}

/// Same layout under a path prefix, for sites served below `/docs` and similar.
#[derive(Debug, Clone)]
pub struct PrefixedLinks {
    prefix: String,
}

impl PrefixedLinks {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }
}

impl LinkBuilder for PrefixedLinks {
    fn reference_href(&self, locale: &str, category: &str) -> String {
        format!(
            "{}{}",
            self.prefix,
            ReferenceLinks.reference_href(locale, category)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_href() {
        assert_eq!(
            ReferenceLinks.reference_href("en", "apps"),
            "/en/rest/reference/apps"
        );
    }

    #[test]
    fn test_operation_href_appends_fragment() {
        assert_eq!(
            ReferenceLinks.operation_href("ja", "apps", "list"),
            "/ja/rest/reference/apps#list"
        );
    }

    #[test]
    fn test_prefixed_links() {
        let links = PrefixedLinks::new("/docs/");
        assert_eq!(
            links.operation_href("en", "apps", "list"),
            "/docs/en/rest/reference/apps#list"
        );
    }
}

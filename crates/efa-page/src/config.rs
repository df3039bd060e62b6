//! Page generation configuration.

use serde::{Deserialize, Serialize};

/// Page generation options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Minify the generated HTML.
    #[serde(default)]
    pub minify: bool,
    /// Optional site stylesheet linked from the document head.
    #[serde(default)]
    pub stylesheet: Option<String>,
}

impl PageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Link a stylesheet from the document head.
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet = Some(href.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = PageConfig::new()
            .with_minify(true)
            .with_stylesheet("/assets/site.css");
        assert!(config.minify);
        assert_eq!(config.stylesheet.as_deref(), Some("/assets/site.css"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: PageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PageConfig::default());
    }
}

//! Typed configuration file.

use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1).
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Port (default: 4000).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request worker threads (default: 4).
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_workers() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

/// Site-wide page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Locale used when the request path carries none.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Locales accepted as the first path segment.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Article title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Article intro paragraph.
    #[serde(default = "default_intro")]
    pub intro: String,
    /// Minify generated HTML.
    #[serde(default)]
    pub minify: bool,
    /// Stylesheet href linked from every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_locales() -> Vec<String> {
    vec![default_locale()]
}

fn default_title() -> String {
    "Endpoints available for GitHub Apps".to_string()
}

fn default_intro() -> String {
    "Your app can make requests to the following REST endpoints.".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales: default_locales(),
            title: default_title(),
            intro: default_intro(),
            minify: false,
            stylesheet: None,
        }
    }
}

impl SiteConfig {
    /// Whether a path segment names a configured locale.
    pub fn is_known_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }
}

/// Availability data settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the precomputed availability JSON.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("enabled-for-apps.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub data: DataConfig,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// `bind:port` for the HTTP server.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

//! Request and article context resolution.
//!
//! These traits are the seams between page handling and the host site:
//! the handler only sees their outputs, which keeps rendering a function of
//! explicit inputs.

use crate::logging::generate_request_id;
use crate::routes::PageRequest;
use efa_common::{Error, Result, VersionId};
use efa_config::SiteConfig;
use serde::Serialize;

/// Representation the client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Html,
    Json,
}

/// Request-scoped metadata.
#[derive(Debug, Clone, Serialize)]
pub struct MainContext {
    pub request_id: String,
    pub locale: String,
    pub version: VersionId,
    pub path: String,
    pub format: ResponseFormat,
}

/// Article metadata shown around the rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleContext {
    pub title: String,
    pub intro: String,
}

/// Resolves request-scoped metadata from a routed request.
pub trait RequestContextResolver: Send + Sync {
    fn resolve(&self, request: &PageRequest) -> Result<MainContext>;
}

/// Resolves article metadata for a request.
pub trait ArticleContextResolver: Send + Sync {
    fn resolve(&self, main: &MainContext) -> ArticleContext;
}

/// Resolves locale and version against the site configuration.
///
/// A path without a locale gets the default locale. An unlisted locale is an
/// invalid request; a version id with unexpected characters is reported as
/// not found.
#[derive(Debug, Clone)]
pub struct SiteRequestContext {
    site: SiteConfig,
}

impl SiteRequestContext {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }
}

impl RequestContextResolver for SiteRequestContext {
    fn resolve(&self, request: &PageRequest) -> Result<MainContext> {
        let locale = match &request.locale {
            Some(locale) if self.site.is_known_locale(locale) => locale.clone(),
            Some(locale) => {
                return Err(Error::InvalidRequest(format!("unknown locale '{}'", locale)))
            }
            None => self.site.default_locale.clone(),
        };

        let version = VersionId::parse(&request.version).ok_or_else(|| Error::VersionNotFound {
            version: request.version.clone(),
        })?;

        let format = match request.query_param("format") {
            Some("json") => ResponseFormat::Json,
            _ => ResponseFormat::Html,
        };

        Ok(MainContext {
            request_id: generate_request_id(),
            locale,
            version,
            path: request.path.clone(),
            format,
        })
    }
}

/// Article metadata taken from the site configuration.
#[derive(Debug, Clone)]
pub struct SiteArticleContext {
    title: String,
    intro: String,
}

impl SiteArticleContext {
    pub fn new(site: &SiteConfig) -> Self {
        Self {
            title: site.title.clone(),
            intro: site.intro.clone(),
        }
    }
}

impl ArticleContextResolver for SiteArticleContext {
    fn resolve(&self, _main: &MainContext) -> ArticleContext {
        ArticleContext {
            title: self.title.clone(),
            intro: self.intro.clone(),
        }
    }
}

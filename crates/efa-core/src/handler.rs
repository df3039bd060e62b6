//! Page handling: lookup → slice → render.

use crate::context::{
    ArticleContextResolver, MainContext, RequestContextResolver, ResponseFormat,
    SiteArticleContext, SiteRequestContext,
};
use crate::provider::AvailabilityProvider;
use crate::routes::PageRequest;
use efa_common::{Error, Result};
use efa_config::SiteConfig;
use efa_page::{render, ArticlePage, LinkBuilder, PageConfig, PageGenerator, ReferenceLinks};
use tracing::{debug, warn};

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// A response ready to be written by the serving layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl PageResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_TEXT,
            body: body.into(),
        }
    }
}

/// Serves the availability page for any version.
///
/// Holds the process-lifetime [`AvailabilityProvider`] and the injected
/// context and link collaborators.
pub struct PageService {
    provider: AvailabilityProvider,
    request_context: Box<dyn RequestContextResolver>,
    article_context: Box<dyn ArticleContextResolver>,
    links: Box<dyn LinkBuilder>,
    generator: PageGenerator,
}

impl PageService {
    /// Service with site-config resolvers and the default link layout.
    pub fn new(provider: AvailabilityProvider, site: &SiteConfig) -> Self {
        Self {
            provider,
            request_context: Box::new(SiteRequestContext::new(site.clone())),
            article_context: Box::new(SiteArticleContext::new(site)),
            links: Box::new(ReferenceLinks),
            generator: PageGenerator::new(page_config(site)),
        }
    }

    pub fn with_request_context(mut self, resolver: impl RequestContextResolver + 'static) -> Self {
        self.request_context = Box::new(resolver);
        self
    }

    pub fn with_article_context(mut self, resolver: impl ArticleContextResolver + 'static) -> Self {
        self.article_context = Box::new(resolver);
        self
    }

    pub fn with_links(mut self, links: impl LinkBuilder + 'static) -> Self {
        self.links = Box::new(links);
        self
    }

    pub fn with_page_config(mut self, config: PageConfig) -> Self {
        self.generator = PageGenerator::new(config);
        self
    }

    pub fn provider(&self) -> &AvailabilityProvider {
        &self.provider
    }

    /// Resolve context, look up data, slice to the requested version and render.
    ///
    /// Unknown versions fail with [`Error::VersionNotFound`] before rendering.
    pub fn build_page(&self, request: &PageRequest) -> Result<(MainContext, ArticlePage)> {
        let main = self.request_context.resolve(request)?;
        let data = self.provider.ensure_loaded()?;
        let categories = data.require(main.version.as_str())?;

        let content = render(categories, &main.locale, self.links.as_ref());
        let article = self.article_context.resolve(&main);
        let page = ArticlePage::new(article.title, article.intro, main.version.as_str(), content);
        Ok((main, page))
    }

    /// Produce the response body in the requested representation.
    pub fn handle(&self, request: &PageRequest) -> Result<PageResponse> {
        let (main, page) = self.build_page(request)?;
        let response = match main.format {
            ResponseFormat::Html => PageResponse {
                status: 200,
                content_type: CONTENT_TYPE_HTML,
                body: self.generator.generate(&page)?,
            },
            ResponseFormat::Json => PageResponse {
                status: 200,
                content_type: CONTENT_TYPE_JSON,
                body: self.generator.generate_json(&page)?,
            },
        };
        debug!(
            request_id = %main.request_id,
            version = %main.version,
            locale = %main.locale,
            categories = page.content.blocks.len(),
            bytes = response.body.len(),
            "page rendered"
        );
        Ok(response)
    }

    /// Like [`PageService::handle`], but errors become error pages.
    pub fn respond(&self, request: &PageRequest) -> PageResponse {
        match self.handle(request) {
            Ok(response) => response,
            Err(e) => self.error_response(&e),
        }
    }

    /// Error page for an error. Internal details stay in the log.
    pub fn error_response(&self, err: &Error) -> PageResponse {
        let status = err.http_status();
        let message = match status {
            400 | 404 => err.to_string(),
            _ => "The page could not be generated. Please try again later.".to_string(),
        };
        if status >= 500 {
            warn!(code = err.code(), error = %err, "request failed");
        }
        self.status_page(status, &message)
    }

    /// Generic HTML page for a bare status.
    pub fn status_page(&self, status: u16, message: &str) -> PageResponse {
        match self.generator.generate_error_page(status, message) {
            Ok(body) => PageResponse {
                status,
                content_type: CONTENT_TYPE_HTML,
                body,
            },
            Err(_) => PageResponse::text(status, message.to_string()),
        }
    }
}

fn page_config(site: &SiteConfig) -> PageConfig {
    let config = PageConfig::new().with_minify(site.minify);
    match &site.stylesheet {
        Some(href) => config.with_stylesheet(href.clone()),
        None => config,
    }
}

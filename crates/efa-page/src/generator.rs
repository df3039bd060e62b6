//! HTML document generation.

use crate::config::PageConfig;
use crate::content::PageContent;
use crate::error::Result;

use askama::Template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Article page data: request metadata plus rendered content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlePage {
    pub title: String,
    pub intro: String,
    /// Version the content was sliced to.
    pub version: String,
    pub content: PageContent,
    pub generated_at: DateTime<Utc>,
}

impl ArticlePage {
    pub fn new(
        title: impl Into<String>,
        intro: impl Into<String>,
        version: impl Into<String>,
        content: PageContent,
    ) -> Self {
        Self {
            title: title.into(),
            intro: intro.into(),
            version: version.into(),
            content,
            generated_at: Utc::now(),
        }
    }
}

// Every string below is escaped before it reaches a template, so templates
// only use `|safe`.

struct HeadingView {
    id: String,
    href: String,
    text: String,
}

struct EntryView {
    fragment: String,
    href: String,
    verb: String,
    request_path: String,
}

struct BlockView {
    category: String,
    heading: Option<HeadingView>,
    entries: Vec<EntryView>,
}

#[derive(Template)]
#[template(
    source = r##"<!DOCTYPE html>
<html lang="{{ lang|safe }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title|safe }}</title>
    <meta name="generator" content="efa-page {{ generator_version|safe }}">
    <meta name="generated" content="{{ generated_at|safe }}">
{%- match stylesheet %}
{%- when Some with (href) %}
    <link rel="stylesheet" href="{{ href|safe }}">
{%- when None %}
{%- endmatch %}
</head>
<body>
<main class="article" data-version="{{ version|safe }}">
    <h1>{{ title|safe }}</h1>
    <p class="intro">{{ intro|safe }}</p>
    <div class="article-body">
{%- for block in blocks %}
        <div class="category-block" data-category="{{ block.category|safe }}">
{%- match block.heading %}
{%- when Some with (h) %}
            <h3 id="{{ h.id|safe }}"><a href="{{ h.href|safe }}">{{ h.text|safe }}</a></h3>
{%- when None %}
{%- endmatch %}
            <ul>{% for e in block.entries %}<li data-fragment="{{ e.fragment|safe }}"><a href="{{ e.href|safe }}"><code><span class="text-uppercase">{{ e.verb|safe }}</span> {{ e.request_path|safe }}</code></a></li>{% endfor %}</ul>
        </div>
{%- endfor %}
    </div>
</main>
</body>
</html>
"##,
    ext = "html"
)]
struct ArticleTemplate<'a> {
    lang: String,
    title: String,
    intro: String,
    version: String,
    generator_version: &'a str,
    generated_at: String,
    stylesheet: Option<String>,
    blocks: Vec<BlockView>,
}

#[derive(Template)]
#[template(
    source = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{{ status }} {{ reason|safe }}</title>
    <meta name="robots" content="noindex, nofollow">
</head>
<body>
<main class="error-page">
    <h1>{{ status }} {{ reason|safe }}</h1>
    <p>{{ message|safe }}</p>
</main>
</body>
</html>
"##,
    ext = "html"
)]
struct ErrorTemplate {
    status: u16,
    reason: String,
    message: String,
}

/// Page generator.
pub struct PageGenerator {
    config: PageConfig,
}

impl PageGenerator {
    /// Create a new page generator with configuration.
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(PageConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Generate the HTML document for an article page.
    pub fn generate(&self, page: &ArticlePage) -> Result<String> {
        let template = ArticleTemplate {
            lang: html_escape(&page.content.locale),
            title: html_escape(&page.title),
            intro: html_escape(&page.intro),
            version: html_escape(&page.version),
            generator_version: env!("CARGO_PKG_VERSION"),
            generated_at: page.generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            stylesheet: self.config.stylesheet.as_deref().map(html_escape),
            blocks: block_views(&page.content),
        };
        let html = template.render()?;
        let output = self.finish(html);

        debug!(
            bytes = output.len(),
            version = %page.version,
            categories = page.content.blocks.len(),
            "page generated"
        );

        Ok(output)
    }

    /// Serialize the structured content of an article page as JSON.
    pub fn generate_json(&self, page: &ArticlePage) -> Result<String> {
        Ok(serde_json::to_string_pretty(page)?)
    }

    /// Generate a small HTML error document.
    pub fn generate_error_page(&self, status: u16, message: &str) -> Result<String> {
        let template = ErrorTemplate {
            status,
            reason: html_escape(status_reason(status)),
            message: html_escape(message),
        };
        Ok(template.render()?)
    }

    fn finish(&self, html: String) -> String {
        if !self.config.minify {
            return html;
        }
        let cfg = minify_html::Cfg {
            minify_js: true,
            minify_css: true,
            ..Default::default()
        };
        String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
    }
}

fn block_views(content: &PageContent) -> Vec<BlockView> {
    content
        .blocks
        .iter()
        .map(|block| BlockView {
            category: html_escape(&block.category),
            heading: block.heading.as_ref().map(|h| HeadingView {
                id: html_escape(&h.id),
                href: html_escape(&h.href),
                text: html_escape(&h.text),
            }),
            entries: block
                .entries
                .iter()
                .map(|e| EntryView {
                    fragment: html_escape(&e.fragment),
                    href: html_escape(&e.href),
                    verb: html_escape(&e.verb),
                    request_path: html_escape(&e.request_path),
                })
                .collect(),
        })
        .collect()
}

fn status_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Error",
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

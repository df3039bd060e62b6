//! Renderer for the "endpoints available for apps" reference page.
//!
//! Rendering happens in two steps:
//!
//! 1. [`render`] turns one version's [`CategoryMap`](efa_common::CategoryMap)
//!    into [`PageContent`]: a heading per non-empty category followed by a
//!    list of operation links. This step is a pure function of its inputs.
//! 2. [`PageGenerator`] wraps that content in a complete HTML article
//!    document (or serializes it as JSON).
//!
//! # Example
//!
//! ```
//! use efa_common::{CategoryMap, OperationDescriptor};
//! use efa_page::{render, ReferenceLinks};
//!
//! let map = CategoryMap::new().with_category(
//!     "apps",
//!     vec![OperationDescriptor::new("list", "get", "/app")],
//! );
//! let content = render(&map, "en", &ReferenceLinks);
//! assert_eq!(content.blocks[0].entries[0].href, "/en/rest/reference/apps#list");
//! assert_eq!(content.blocks[0].entries[0].label, "GET /app");
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod links;

pub use config::PageConfig;
pub use content::{render, CategoryBlock, Heading, OperationEntry, PageContent};
pub use error::{PageError, Result};
pub use generator::{ArticlePage, PageGenerator};
pub use links::{LinkBuilder, PrefixedLinks, ReferenceLinks};

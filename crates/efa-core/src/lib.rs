//! Serving core for the "endpoints available for apps" reference page.
//!
//! A page view runs three steps:
//!
//! 1. **Lookup**: [`provider::AvailabilityProvider::ensure_loaded`] returns the
//!    versioned availability data, invoking the injected
//!    [`source::AvailabilitySource`] at most once per provider.
//! 2. **Slice**: the data is narrowed to the version named in the request path.
//!    Unknown versions are answered with "not found".
//! 3. **Render**: [`efa_page::render`] builds the grouped link list, which
//!    [`efa_page::PageGenerator`] wraps in an article document.
//!
//! Request plumbing (locale/version resolution, article metadata, link layout)
//! sits behind the traits in [`context`] and [`efa_page::LinkBuilder`].

pub mod context;
pub mod exit_codes;
pub mod handler;
pub mod logging;
pub mod provider;
pub mod routes;
pub mod server;
pub mod source;

pub use context::{
    ArticleContext, ArticleContextResolver, MainContext, RequestContextResolver,
    ResponseFormat, SiteArticleContext, SiteRequestContext,
};
pub use exit_codes::ExitCode;
pub use handler::{PageResponse, PageService};
pub use provider::AvailabilityProvider;
pub use routes::{route, PageRequest, Route};
pub use server::PageServer;
pub use source::{AvailabilitySource, FnSource, JsonFileSource, StaticSource};

//! Error types for page generation.

use thiserror::Error;

/// Result type for page operations.
pub type Result<T> = std::result::Result<T, PageError>;

/// Errors that can occur during page generation.
#[derive(Error, Debug)]
pub enum PageError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Template rendering error.
    #[error("template error: {0}")]
    TemplateError(String),
}

impl From<askama::Error> for PageError {
    fn from(err: askama::Error) -> Self {
        PageError::TemplateError(err.to_string())
    }
}

impl From<PageError> for efa_common::Error {
    fn from(err: PageError) -> Self {
        match err {
            PageError::JsonError(e) => efa_common::Error::Json(e),
            PageError::TemplateError(msg) => efa_common::Error::Render(msg),
        }
    }
}

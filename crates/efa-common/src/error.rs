//! Error types for the reference page service.
//!
//! Errors carry:
//! - Stable error codes for machine parsing
//! - A category for grouping
//! - A recoverability hint (a later request may succeed)
//! - The HTTP status the serving layer should answer with
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Data Error
//!   Reason: availability lookup via 'file:enabled-for-apps.json' failed: not found
//!   Fix: Check the data path, then run 'efa-core check'
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for reference page operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration file errors.
    Config,
    /// Availability data lookup and validation errors.
    Data,
    /// Request errors (unknown version, bad path).
    Request,
    /// Page rendering errors.
    Render,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Data => write!(f, "data"),
            ErrorCategory::Request => write!(f, "request"),
            ErrorCategory::Render => write!(f, "render"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Data errors (20-29)
    #[error("availability lookup via '{source_name}' failed: {reason}")]
    LookupFailed { source_name: String, reason: String },

    #[error("malformed availability data: {0}")]
    MalformedData(String),

    // Request errors (30-39)
    #[error("version not found: {version}")]
    VersionNotFound { version: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // Render errors (40-49)
    #[error("render failed: {0}")]
    Render(String),

    // I/O errors (50-59)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Data errors
    /// - 30-39: Request errors
    /// - 40-49: Render errors
    /// - 50-59: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::LookupFailed { .. } => 20,
            Error::MalformedData(_) => 21,
            Error::VersionNotFound { .. } => 30,
            Error::InvalidRequest(_) => 31,
            Error::Render(_) => 40,
            Error::Io(_) => 50,
            Error::Json(_) => 51,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) => ErrorCategory::Config,
            Error::LookupFailed { .. } | Error::MalformedData(_) => ErrorCategory::Data,
            Error::VersionNotFound { .. } | Error::InvalidRequest(_) => ErrorCategory::Request,
            Error::Render(_) => ErrorCategory::Render,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether retrying the same request later may succeed.
    ///
    /// A failed lookup leaves the availability cache empty, so the next
    /// request runs the lookup again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::LookupFailed { .. } => true,
            Error::MalformedData(_) => false,
            Error::VersionNotFound { .. } => false,
            Error::InvalidRequest(_) => false,
            Error::Render(_) => false,
            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// HTTP status code the serving layer answers with.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::VersionNotFound { .. } => 404,
            Error::InvalidRequest(_) => 400,
            _ => 500,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => "Check the config file, then run 'efa-core check'",
            Error::LookupFailed { .. } => "Check the data path, then run 'efa-core check'",
            Error::MalformedData(_) => "Regenerate the availability data file",
            Error::VersionNotFound { .. } => "Run 'efa-core versions' to list known versions",
            Error::InvalidRequest(_) => "Check the request URL",
            Error::Render(_) => "Report this as a bug",
            Error::Io(_) => "Check file permissions and paths",
            Error::Json(_) => "Report this as a bug",
        }
    }

    /// Short headline for the error category, used in human output.
    pub fn headline(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Config => "Configuration Error",
            ErrorCategory::Data => "Data Error",
            ErrorCategory::Request => "Not Found",
            ErrorCategory::Render => "Render Error",
            ErrorCategory::Io => "I/O Error",
        }
    }

    /// Format for a terminal: headline, reason, fix.
    pub fn format_human(&self) -> String {
        format!(
            "✗ {}\n  Reason: {}\n  Fix: {}",
            self.headline(),
            self,
            self.remediation()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_by_category() {
        assert_eq!(Error::Config("x".into()).code(), 10);
        assert_eq!(
            Error::VersionNotFound {
                version: "v9".into()
            }
            .code(),
            30
        );
        assert_eq!(
            Error::LookupFailed {
                source_name: "file".into(),
                reason: "gone".into()
            }
            .category(),
            ErrorCategory::Data
        );
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            Error::VersionNotFound {
                version: "v9".into()
            }
            .http_status(),
            404
        );
        assert_eq!(Error::InvalidRequest("bad".into()).http_status(), 400);
        assert_eq!(Error::MalformedData("bad".into()).http_status(), 500);
    }

    #[test]
    fn test_lookup_failure_is_recoverable() {
        let err = Error::LookupFailed {
            source_name: "file".into(),
            reason: "timeout".into(),
        };
        assert!(err.is_recoverable());
        assert!(!Error::MalformedData("x".into()).is_recoverable());
    }

    #[test]
    fn test_format_human() {
        let err = Error::VersionNotFound {
            version: "enterprise-server@2.0".into(),
        };
        let text = err.format_human();
        assert!(text.starts_with("✗ Not Found"));
        assert!(text.contains("enterprise-server@2.0"));
        assert!(text.contains("efa-core versions"));
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::Request).unwrap();
        assert_eq!(json, "\"request\"");
    }
}

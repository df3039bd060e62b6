//! Configuration validation errors and semantic validation.

use crate::config::Config;
use efa_common::id::is_locale_tag;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Schema validation failed: {0}")]
    SchemaError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SchemaError(_) => 62,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

impl From<ValidationError> for efa_common::Error {
    fn from(err: ValidationError) -> Self {
        efa_common::Error::Config(err.to_string())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate configuration semantically.
pub fn validate_config(config: &Config) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.server.bind.trim().is_empty() {
        return Err(ValidationError::MissingField("server.bind".to_string()));
    }
    if config.server.port == 0 {
        return Err(invalid("server.port", "must be non-zero"));
    }
    if !(1..=64).contains(&config.server.workers) {
        return Err(invalid(
            "server.workers",
            format!("{} is outside 1..=64", config.server.workers),
        ));
    }

    if config.site.locales.is_empty() {
        return Err(ValidationError::MissingField("site.locales".to_string()));
    }
    for locale in &config.site.locales {
        if !is_locale_tag(locale) {
            return Err(invalid("site.locales", format!("'{}' is not a locale tag", locale)));
        }
    }
    if !config.site.is_known_locale(&config.site.default_locale) {
        return Err(ValidationError::SemanticError(format!(
            "default locale '{}' is not listed in site.locales",
            config.site.default_locale
        )));
    }
    if config.site.title.trim().is_empty() {
        return Err(ValidationError::MissingField("site.title".to_string()));
    }

    if config.data.path.as_os_str().is_empty() {
        return Err(ValidationError::MissingField("data.path".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        validate_config(&Config::default()).unwrap();
    }

    #[test]
    fn test_version_mismatch() {
        let mut config = Config::default();
        config.schema_version = "0.9.0".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));
        assert_eq!(err.code(), 66);
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_workers_bounds() {
        let mut config = Config::default();
        config.server.workers = 0;
        assert!(validate_config(&config).is_err());
        config.server.workers = 65;
        assert!(validate_config(&config).is_err());
        config.server.workers = 64;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_default_locale_must_be_listed() {
        let mut config = Config::default();
        config.site.default_locale = "ja".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::SemanticError(_)));
    }

    #[test]
    fn test_bad_locale_tag() {
        let mut config = Config::default();
        config.site.locales.push("EN_us".to_string());
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_converts_to_common_error() {
        let err: efa_common::Error = ValidationError::MissingField("site.title".into()).into();
        assert_eq!(err.code(), 10);
    }
}

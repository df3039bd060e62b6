//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → /etc → defaults.

use crate::config::Config;
use crate::validate::{validate_config, ValidationResult};
use std::path::{Path, PathBuf};

/// Discovered configuration file path.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to config.json (or None if not found).
    pub config: Option<PathBuf>,

    /// Source of the config file (for diagnostics).
    pub source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/enabled-for-apps/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "EFA_CONFIG";
pub const ENV_CONFIG_DIR: &str = "EFA_CONFIG_DIR";
pub const ENV_DATA_PATH: &str = "EFA_DATA";

/// Standard config file name.
const CONFIG_FILENAME: &str = "config.json";

/// Application name for XDG directories.
const APP_NAME: &str = "enabled-for-apps";

/// Resolve the configuration file path.
///
/// Resolution order:
/// 1. Explicit CLI path (always used; must exist)
/// 2. `EFA_CONFIG` environment variable
/// 3. `EFA_CONFIG_DIR` environment variable + config.json
/// 4. XDG config directory (~/.config/enabled-for-apps/)
/// 5. System config (/etc/enabled-for-apps/)
/// 6. Built-in defaults (None)
pub fn resolve_config(cli_config: Option<&Path>) -> ConfigPaths {
    // 1. CLI argument, taken as given; a missing file fails in load_config
    if let Some(path) = cli_config {
        return found(path.to_path_buf(), ConfigSource::CliArgument);
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(CONFIG_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(CONFIG_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    // 5. System config
    let system_path = system_config_dir().join(CONFIG_FILENAME);
    if system_path.exists() {
        return found(system_path, ConfigSource::SystemConfig);
    }

    // 6. Built-in default
    ConfigPaths::default()
}

fn found(path: PathBuf, source: ConfigSource) -> ConfigPaths {
    ConfigPaths {
        config: Some(path),
        source,
    }
}

/// Load and validate the resolved configuration.
///
/// Without a resolved path the built-in defaults are used. A resolved path
/// that cannot be read is a [`ValidationError::IoError`](crate::ValidationError::IoError).
pub fn load_config(paths: &ConfigPaths) -> ValidationResult<Config> {
    let config = match &paths.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    validate_config(&config)?;
    Ok(config)
}

/// Resolve the availability data path: CLI → `EFA_DATA` → config.
pub fn resolve_data_path(cli_data: Option<&Path>, config: &Config) -> PathBuf {
    if let Some(path) = cli_data {
        return path.to_path_buf();
    }
    if let Ok(env_path) = std::env::var(ENV_DATA_PATH) {
        if !env_path.is_empty() {
            return PathBuf::from(env_path);
        }
    }
    config.data.path.clone()
}

/// Get the XDG config directory for enabled-for-apps.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::CliArgument), "CLI argument");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(format!("{}", ConfigSource::SystemConfig), "system config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_system_config_dir() {
        assert_eq!(system_config_dir(), PathBuf::from("/etc/enabled-for-apps"));
    }

    #[test]
    fn test_load_defaults_without_file() {
        let config = load_config(&ConfigPaths::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_data_path_wins() {
        let config = Config::default();
        let path = resolve_data_path(Some(Path::new("/tmp/cli.json")), &config);
        assert_eq!(path, PathBuf::from("/tmp/cli.json"));
    }
}

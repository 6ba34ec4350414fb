//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::BackendConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSection,

    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Prediction backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSection {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_predict_path")]
    pub predict_path: String,

    /// Unset means requests wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_predict_path() -> String {
    "/predict".to_string()
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            predict_path: default_predict_path(),
            request_timeout_secs: None,
        }
    }
}

impl BackendSection {
    /// Client configuration for this section
    pub fn client_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.url.clone(),
            predict_path: self.predict_path.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Clock configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

fn default_tick_interval() -> u64 {
    1000 // 1 second
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl ClockConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let (config, errors) = Self::discover();
        for e in &errors {
            tracing::warn!("{}", e);
        }
        config
    }

    /// Default config search paths, in priority order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("wait-estimator").join("config.toml")),
            Some(PathBuf::from("/etc/wait-estimator/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from the default locations, returning the errors of any file
    /// that exists but could not be loaded.
    ///
    /// Callers report the errors once logging is up.
    pub fn discover() -> (Self, Vec<ConfigError>) {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first existing file of `paths` that loads cleanly, falling
    /// back to defaults with environment overrides
    pub fn load_first(paths: &[PathBuf]) -> (Self, Vec<ConfigError>) {
        let mut errors = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    return (config, errors);
                }
                Err(e) => errors.push(e),
            }
        }

        (Self::from_env(), errors)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment, in production)
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Backend overrides
        if let Some(url) = lookup("WAIT_ESTIMATOR_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(secs) = lookup("WAIT_ESTIMATOR_REQUEST_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.backend.request_timeout_secs = Some(s);
            }
        }

        // Logging overrides
        if let Some(level) = lookup("WAIT_ESTIMATOR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WAIT_ESTIMATOR_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Wait Estimator Configuration
#
# Environment variables override these settings:
# - WAIT_ESTIMATOR_BACKEND_URL
# - WAIT_ESTIMATOR_REQUEST_TIMEOUT_SECS
# - WAIT_ESTIMATOR_LOG_LEVEL
# - WAIT_ESTIMATOR_LOG_FORMAT

[backend]
# Prediction backend base URL
url = "http://127.0.0.1:8000"

# Prediction endpoint path
predict_path = "/predict"

# Request timeout in seconds (unset: wait for as long as the backend takes)
# request_timeout_secs = 30

[clock]
# How often the on-screen clock refreshes (ms)
tick_interval_ms = 1000

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://127.0.0.1:8000");
        assert_eq!(config.backend.request_timeout_secs, None);
        assert_eq!(config.clock.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.backend.url, default_backend_url());
        assert_eq!(config.backend.predict_path, "/predict");
        assert_eq!(config.clock.tick_interval_ms, 1000);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[backend]\nurl = \"http://hospital:9000\"\nrequest_timeout_secs = 5"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.url, "http://hospital:9000");
        assert_eq!(config.backend.predict_path, "/predict");

        let client = config.backend.client_config();
        assert_eq!(client.predict_url(), "http://hospital:9000/predict");
        assert_eq!(client.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/wait-estimator.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend\nurl =").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_first_reports_broken_files() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "[backend\nurl =").unwrap();
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "[clock]\ntick_interval_ms = 250").unwrap();

        let paths = vec![
            PathBuf::from("/nonexistent/wait-estimator.toml"),
            broken.path().to_path_buf(),
            good.path().to_path_buf(),
        ];
        let (config, errors) = Config::load_first(&paths);

        assert_eq!(config.clock.tick_interval_ms, 250);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ConfigError::Parse { path, .. } if path == broken.path()));
    }

    #[test]
    fn test_load_first_falls_back_to_defaults() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "not = [valid").unwrap();

        let (config, errors) = Config::load_first(&[broken.path().to_path_buf()]);

        assert_eq!(config.clock.tick_interval_ms, 1000);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WAIT_ESTIMATOR_BACKEND_URL", "http://override:1234"),
            ("WAIT_ESTIMATOR_REQUEST_TIMEOUT_SECS", "not-a-number"),
            ("WAIT_ESTIMATOR_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.url, "http://override:1234");
        assert_eq!(config.backend.request_timeout_secs, None);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }
}

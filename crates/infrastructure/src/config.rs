//! Application configuration
//!
//! Loaded once at startup from the JSON file named on the command line, with
//! `TRAINMAP_*` environment variables layered on top
//! (`TRAINMAP_RESOLVER__BASE_URL` sets `resolver.base_url`).

use std::fmt;
use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File, FileFormat};
use integration_trainmap::ResolverConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ENV_PREFIX: &str = "TRAINMAP";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// How failures map onto HTTP status codes
///
/// The body of an error response is the same either way; only the status
/// line differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatusPolicy {
    /// Every failure is `400 Bad Request`
    #[default]
    Uniform,
    /// 400 for bad input, 404 for lookup misses, 502 for resolver failures
    /// and 500 for internal errors
    Differentiated,
}

impl fmt::Display for ErrorStatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Differentiated => write!(f, "differentiated"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port to listen on
    pub host_port: u16,

    /// Address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Directory holding the static web frontend
    #[serde(default)]
    pub frontend_root: PathBuf,

    /// Serve `frontend_root` at `/`
    #[serde(default)]
    pub serve_frontend: bool,

    /// Extra days covered by point searches after the reference date
    pub sight_preview_day_count: u32,

    /// Dataset the resolver answers from
    pub database_filepath: String,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub error_status_policy: ErrorStatusPolicy,

    /// Seconds open connections get to finish after a termination signal
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,

    /// Resolver service connection
    #[serde(default)]
    pub resolver: ResolverConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_shutdown_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from a JSON file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, a required key
    /// is absent, or validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(
            path.as_ref(),
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration");

        let config: Self = config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Json))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_filepath.trim().is_empty() {
            return Err("database_filepath must not be empty".to_string());
        }

        if self.serve_frontend && self.frontend_root.as_os_str().is_empty() {
            return Err("frontend_root is required when serve_frontend is enabled".to_string());
        }

        self.resolver
            .validate()
            .map_err(|e| format!("resolver: {e}"))
    }

    /// `host:port` string to bind the listener to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.host_port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(source))
    }

    const MINIMAL: &str = r#"{
        "host_port": 8080,
        "sight_preview_day_count": 2,
        "database_filepath": "/data/gtfs.db"
    }"#;

    #[test]
    fn minimal_file_uses_defaults() {
        let file = write_config(MINIMAL);
        let config = AppConfig::load_with_env(file.path(), env_from(&[])).unwrap();

        assert_eq!(config.host_port, 8080);
        assert_eq!(config.sight_preview_day_count, 2);
        assert_eq!(config.database_filepath, "/data/gtfs.db");
        assert_eq!(config.host, "0.0.0.0");
        assert!(!config.serve_frontend);
        assert!(config.frontend_root.as_os_str().is_empty());
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.error_status_policy, ErrorStatusPolicy::Uniform);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.resolver, ResolverConfig::default());
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn full_file() {
        let file = write_config(
            r#"{
                "host_port": 9000,
                "host": "127.0.0.1",
                "frontend_root": "./frontend/dist",
                "serve_frontend": true,
                "sight_preview_day_count": 0,
                "database_filepath": "/data/gtfs.db",
                "log_format": "json",
                "error_status_policy": "differentiated",
                "resolver": { "base_url": "http://resolver:8089", "timeout_secs": 10 }
            }"#,
        );
        let config = AppConfig::load_with_env(file.path(), env_from(&[])).unwrap();

        assert!(config.serve_frontend);
        assert_eq!(config.frontend_root, PathBuf::from("./frontend/dist"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.error_status_policy, ErrorStatusPolicy::Differentiated);
        assert_eq!(config.resolver.base_url, "http://resolver:8089");
        assert_eq!(config.resolver.timeout_secs, 10);
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(MINIMAL);
        let env = env_from(&[
            ("TRAINMAP_HOST_PORT", "9999"),
            ("TRAINMAP_RESOLVER__BASE_URL", "http://other:1234"),
        ]);
        let config = AppConfig::load_with_env(file.path(), env).unwrap();

        assert_eq!(config.host_port, 9999);
        assert_eq!(config.resolver.base_url, "http://other:1234");
    }

    #[test]
    fn missing_required_key_fails() {
        let file = write_config(r#"{ "host_port": 8080, "database_filepath": "/data/gtfs.db" }"#);
        assert!(AppConfig::load_with_env(file.path(), env_from(&[])).is_err());
    }

    #[test]
    fn malformed_file_fails() {
        let file = write_config("{ not json");
        assert!(AppConfig::load_with_env(file.path(), env_from(&[])).is_err());
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(AppConfig::load_with_env(&path, env_from(&[])).is_err());
    }

    #[test]
    fn empty_database_path_is_rejected() {
        let file = write_config(
            r#"{ "host_port": 8080, "sight_preview_day_count": 1, "database_filepath": "" }"#,
        );
        let err = AppConfig::load_with_env(file.path(), env_from(&[])).unwrap_err();
        assert!(err.to_string().contains("database_filepath"));
    }

    #[test]
    fn frontend_requires_root() {
        let file = write_config(
            r#"{
                "host_port": 8080,
                "sight_preview_day_count": 1,
                "database_filepath": "/data/gtfs.db",
                "serve_frontend": true
            }"#,
        );
        let err = AppConfig::load_with_env(file.path(), env_from(&[])).unwrap_err();
        assert!(err.to_string().contains("frontend_root"));
    }

    #[test]
    fn bad_resolver_url_is_rejected() {
        let file = write_config(
            r#"{
                "host_port": 8080,
                "sight_preview_day_count": 1,
                "database_filepath": "/data/gtfs.db",
                "resolver": { "base_url": "ftp://resolver" }
            }"#,
        );
        let err = AppConfig::load_with_env(file.path(), env_from(&[])).unwrap_err();
        assert!(err.to_string().contains("resolver"));
    }

    #[test]
    fn error_status_policy_serde() {
        let policy: ErrorStatusPolicy = serde_json::from_str("\"differentiated\"").unwrap();
        assert_eq!(policy, ErrorStatusPolicy::Differentiated);
        assert_eq!(ErrorStatusPolicy::Uniform.to_string(), "uniform");
        assert!(serde_json::from_str::<ErrorStatusPolicy>("\"strict\"").is_err());
    }
}

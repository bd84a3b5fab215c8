//! Resolver client configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the trainmap resolver client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL of the resolver service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8089".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ResolverConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url {:?} is not a valid URL: {e}", self.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("base_url must be http or https, got {}", url.scheme()));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

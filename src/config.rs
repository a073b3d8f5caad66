use crate::error::{ExplorerError, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the upstream GitHub client.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub api_base_url: Url,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            user_agent: format!("Profile Explorer/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ExplorerConfig {
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self> {
        let api_base_url = Url::parse(api_url)?;

        if api_base_url.cannot_be_a_base() {
            return Err(ExplorerError::ConfigError(format!(
                "API URL cannot be used as a base: {}",
                api_url
            )));
        }

        if timeout_secs == 0 {
            return Err(ExplorerError::ConfigError(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            ..Default::default()
        })
    }
}

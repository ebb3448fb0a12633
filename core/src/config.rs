//! Runtime configuration for fetchers and the reqwest transport.
//!
//! Values come from `FetchConfig::default()`, optionally overridden by the
//! environment through `FetchConfig::from_env()`. Binaries layer their CLI
//! flags on top.

use std::time::Duration;

use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("fetch-core/", env!("CARGO_PKG_VERSION"));

pub const ENV_BASE_URL: &str = "PLACEHOLDER_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "FETCH_TIMEOUT_MS";
pub const ENV_ACCEPT_ANY_STATUS: &str = "FETCH_ACCEPT_ANY_STATUS";

/// How a resolved response's status code affects the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Non-2xx responses end in `FetchError::HttpStatus`, even when the body
    /// is valid JSON.
    #[default]
    RequireSuccess,
    /// Parse the body whatever the status code.
    AcceptAny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub status_policy: StatusPolicy,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            status_policy: StatusPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Defaults overridden by `PLACEHOLDER_BASE_URL`, `FETCH_TIMEOUT_MS` and
    /// `FETCH_ACCEPT_ANY_STATUS`.
    pub fn from_env() -> Result<Self, FetchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FetchError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                FetchError::Configuration(format!("{ENV_TIMEOUT_MS} must be a number of milliseconds, got '{raw}'"))
            })?;
            config.timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(ENV_ACCEPT_ANY_STATUS) {
            config.status_policy = if parse_flag(ENV_ACCEPT_ANY_STATUS, &raw)? {
                StatusPolicy::AcceptAny
            } else {
                StatusPolicy::RequireSuccess
            };
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, FetchError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FetchError::Configuration(format!("{key} must be a boolean, got '{raw}'"))),
    }
}

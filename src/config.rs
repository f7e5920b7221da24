//! Runtime configuration.
//!
//! Everything has a working default; each value can be overridden through a
//! `HUBPAGE_*` environment variable.

use crate::dates::DateFormat;
use crate::error::{HubError, HubResult};
use reqwest::header::HeaderValue;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the GitHub REST API, without a trailing slash.
    pub api_url: String,
    /// chrono strftime pattern used for every rendered date.
    pub date_format: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("hubpage/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> HubResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> HubResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("HUBPAGE_API_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(HubError::Config(format!(
                    "HUBPAGE_API_URL must be an http(s) URL, got '{url}'"
                )));
            }
            config.api_url = url;
        }

        if let Some(format) = get("HUBPAGE_DATE_FORMAT") {
            if !DateFormat::new(format.as_str()).is_valid() {
                return Err(HubError::Config(format!(
                    "HUBPAGE_DATE_FORMAT is not a valid strftime pattern: '{format}'"
                )));
            }
            config.date_format = format;
        }

        if let Some(raw) = get("HUBPAGE_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    HubError::Config(format!(
                        "HUBPAGE_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    ))
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(agent) = get("HUBPAGE_USER_AGENT") {
            if HeaderValue::from_str(&agent).is_err() {
                return Err(HubError::Config(format!(
                    "HUBPAGE_USER_AGENT is not a valid header value: {agent:?}"
                )));
            }
            config.user_agent = agent;
        }

        Ok(config)
    }
}

use std::time::Duration;

use thiserror::Error;

/// Live admin backend, used when no usable base URL is configured
pub const LIVE_API_URL: &str = "https://appadmin.moonadelivery.com";

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive whole number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runtime settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub page_size: usize,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allow_localhost = lookup("ADMIN_ALLOW_LOCALHOST").is_some_and(|v| is_truthy(&v));
        let api_url = resolve_api_base(lookup("ADMIN_API_URL").as_deref(), allow_localhost);

        let api_token = lookup("ADMIN_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let page_size = parse_positive(&lookup, "ADMIN_PAGE_SIZE")?
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let timeout_secs = parse_positive(&lookup, "ADMIN_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_url,
            api_token,
            page_size,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Pick the API base URL
///
/// Blank values fall back to the live server. A localhost value is replaced
/// by the live server unless `ADMIN_ALLOW_LOCALHOST` is set.
pub fn resolve_api_base(configured: Option<&str>, allow_localhost: bool) -> String {
    let configured = configured.map(str::trim).unwrap_or_default();
    if configured.is_empty() {
        return LIVE_API_URL.to_string();
    }
    if configured.to_lowercase().contains("localhost") && !allow_localhost {
        return LIVE_API_URL.to_string();
    }
    configured.trim_end_matches('/').to_string()
}

fn parse_positive<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
        }),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

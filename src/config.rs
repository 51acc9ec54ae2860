//! Configuration types, built from environment variables.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default backend address used by the web frontend during development.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Security control used when none is configured (Authentication).
pub const DEFAULT_SECURITY_CONTROL_ID: i64 = 1;

/// Connection settings for the RecSec backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request, if any.
    pub access_token: Option<SecretString>,
    /// Optional per-request timeout. Requests wait indefinitely when unset.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build config from `RECSEC_API_URL`, `RECSEC_ACCESS_TOKEN` and
    /// `RECSEC_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("RECSEC_API_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let access_token = std::env::var("RECSEC_ACCESS_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::from);

        let request_timeout = optional_number::<u64>("RECSEC_REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs);

        Ok(Self {
            base_url,
            access_token,
            request_timeout,
        })
    }
}

/// What the terminal recommender session should run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub project_id: i64,
    pub security_control_id: i64,
}

impl SessionConfig {
    /// Build config from `RECSEC_PROJECT_ID` (required) and
    /// `RECSEC_SECURITY_CONTROL_ID` (defaults to Authentication).
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = optional_number::<i64>("RECSEC_PROJECT_ID")?
            .ok_or_else(|| ConfigError::MissingEnvVar("RECSEC_PROJECT_ID".to_string()))?;
        let security_control_id = optional_number::<i64>("RECSEC_SECURITY_CONTROL_ID")?
            .unwrap_or(DEFAULT_SECURITY_CONTROL_ID);
        Ok(Self {
            project_id,
            security_control_id,
        })
    }
}

fn optional_number<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_number(key, &raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        })
}

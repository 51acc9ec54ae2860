//! REST client for the RecSec backend.
//!
//! One shared `reqwest::Client` and no retries. Every
//! failure is logged with the operation that caused it and then returned
//! to the caller as an [`ApiError`].
//!
//! Credentials are injected through [`CredentialProvider`]; token storage
//! and refresh live outside this crate.

mod ai;
pub mod backend;
mod projects;
mod recommendations;
mod security_patterns;
#[cfg(test)]
pub(crate) mod stub;

pub use backend::RecSecBackend;
pub use recommendations::DialogSubject;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Supplies the bearer token attached to outbound requests.
///
/// Called once per request, so implementations can hand out a freshly
/// refreshed token each time.
pub trait CredentialProvider: Send + Sync {
    fn access_token(&self) -> Option<SecretString>;
}

/// A fixed token, e.g. from `RECSEC_ACCESS_TOKEN`.
pub struct StaticCredentials {
    token: SecretString,
}

impl StaticCredentials {
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }
}

impl CredentialProvider for StaticCredentials {
    fn access_token(&self) -> Option<SecretString> {
        Some(self.token.clone())
    }
}

/// Sends requests without an `Authorization` header.
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn access_token(&self) -> Option<SecretString> {
        None
    }
}

/// HTTP client for the RecSec REST API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
    request_timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            credentials,
            request_timeout: None,
        })
    }

    /// Build a client from configuration, using a static token when one is set.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let credentials: Arc<dyn CredentialProvider> = match &config.access_token {
            Some(token) => Arc::new(StaticCredentials::new(token.clone())),
            None => Arc::new(Anonymous),
        };
        let mut client = Self::new(config.base_url.clone(), credentials)?;
        client.request_timeout = config.request_timeout;
        Ok(client)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with credentials and timeout applied.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.credentials.access_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    /// Send a request and fail on transport errors or non-2xx statuses.
    async fn send(&self, operation: &str, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            let err = if e.is_timeout() {
                ApiError::Timeout {
                    operation: operation.to_string(),
                    timeout: self.request_timeout.unwrap_or_default(),
                }
            } else {
                ApiError::Transport {
                    operation: operation.to_string(),
                    reason: e.to_string(),
                }
            };
            tracing::error!(operation, error = %err, "Request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(operation, status = status.as_u16(), body = %body, "Request rejected");
            return Err(ApiError::Status {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(operation, status = status.as_u16(), "Request succeeded");
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(operation, builder).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to decode response");
            ApiError::InvalidResponse {
                operation: operation.to_string(),
                reason: e.to_string(),
            }
        })
    }

    async fn send_text(&self, operation: &str, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = self.send(operation, builder).await?;
        response.text().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to read response body");
            ApiError::InvalidResponse {
                operation: operation.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

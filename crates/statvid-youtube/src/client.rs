//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API key management, retry on transient failures and
//! typed response deserialization. Non-2xx responses are decoded from the
//! API's error envelope into [`YouTubeError::Api`] so the retry loop can
//! classify them.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use statvid_core::AppConfig;

use crate::error::YouTubeError;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::types::ErrorEnvelope;

/// Client for the YouTube Data API.
///
/// Use [`YouTubeClient::new`] with the process configuration, or
/// [`YouTubeClient::with_base_url`] to point at a mock server in tests.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    retry: RetryPolicy,
}

impl YouTubeClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::MissingApiKey`] if no API key is configured.
    /// - [`YouTubeError::InvalidBaseUrl`] if the configured base URL is invalid.
    /// - [`YouTubeError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, YouTubeError> {
        let api_key = config
            .youtube_api_key
            .as_deref()
            .ok_or(YouTubeError::MissingApiKey)?;
        Self::with_base_url(
            api_key,
            config.request_timeout_secs,
            &config.youtube_base_url,
            RetryPolicy::new(config.max_retries, config.retry_backoff_base_ms),
        )
    }

    /// Creates a client with a custom base URL and retry policy.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::MissingApiKey`] if `api_key` is blank.
    /// - [`YouTubeError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    /// - [`YouTubeError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        retry: RetryPolicy,
    ) -> Result<Self, YouTubeError> {
        if api_key.trim().is_empty() {
            return Err(YouTubeError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("statvid/0.1 (channel-discovery)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the resource
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YouTubeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_owned(),
            base_url,
            retry,
        })
    }

    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Builds the request URL for `resource` with percent-encoded parameters.
    /// The API key is always the first query pair.
    pub(crate) fn build_url(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, YouTubeError> {
        let mut url = self
            .base_url
            .join(resource)
            .map_err(|e| YouTubeError::InvalidBaseUrl {
                url: format!("{}{resource}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Issues a GET against `resource` through the retry wrapper and decodes
    /// the body as `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YouTubeError> {
        let url = self.build_url(resource, params)?;
        retry_with_backoff(&self.retry, resource, || {
            let url = url.clone();
            async move { self.request_once(resource, url).await }
        })
        .await
    }

    /// One attempt: send, map non-2xx through the error envelope, decode.
    ///
    /// The URL carries the API key, so only `resource` is used as error
    /// context.
    async fn request_once<T: DeserializeOwned>(
        &self,
        resource: &str,
        url: Url,
    ) -> Result<T, YouTubeError> {
        tracing::debug!(resource, "YouTube request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(resource, status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| YouTubeError::Deserialize {
            context: resource.to_owned(),
            source: e,
        })
    }
}

/// Decodes the API error envelope; unrecognised bodies keep the status with
/// an empty reason.
fn api_error(resource: &str, status: u16, body: &str) -> YouTubeError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let reason = envelope
        .as_ref()
        .and_then(|e| e.error.errors.iter().find_map(|d| d.reason.clone()))
        .unwrap_or_default();
    let message = envelope
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.chars().take(200).collect());
    YouTubeError::Api {
        endpoint: resource.to_owned(),
        status,
        reason,
        message,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

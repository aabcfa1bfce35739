use thiserror::Error;

/// Whether a failed request is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate limiting, server-side errors and transport hiccups.
    Transient,
    /// Anything a retry cannot fix: bad request, auth, not found, bad payload.
    Permanent,
}

/// Errors returned by the YouTube Data API client.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// No API credential was configured; the client refuses to start.
    #[error("YOUTUBE_API_KEY is required to initialize the YouTube client")]
    MissingApiKey,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("YouTube API error {status} ({reason}) on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        reason: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// `403` reasons that signal short-term throttling rather than a hard denial.
const THROTTLE_REASONS: [&str; 2] = ["rateLimitExceeded", "userRateLimitExceeded"];

impl YouTubeError {
    /// Classifies the failure for the retry loop.
    ///
    /// - `429` and `5xx` are transient.
    /// - `403` is transient only for per-user/per-second throttling reasons;
    ///   `quotaExceeded` and `forbidden` will not clear within a backoff window.
    /// - Transport timeouts and connection failures are transient.
    /// - Everything else is permanent.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            YouTubeError::Api { status, reason, .. } => {
                let transient = *status == 429
                    || (500..600).contains(status)
                    || (*status == 403 && THROTTLE_REASONS.contains(&reason.as_str()));
                if transient {
                    FailureKind::Transient
                } else {
                    FailureKind::Permanent
                }
            }
            YouTubeError::Http(e) => {
                if e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| s.is_server_error())
                {
                    FailureKind::Transient
                } else {
                    FailureKind::Permanent
                }
            }
            YouTubeError::MissingApiKey
            | YouTubeError::Deserialize { .. }
            | YouTubeError::InvalidBaseUrl { .. } => FailureKind::Permanent,
        }
    }

    /// Convenience for `kind() == FailureKind::Transient`.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.kind() == FailureKind::Transient
    }
}

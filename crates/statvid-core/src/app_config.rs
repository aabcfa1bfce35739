use std::path::PathBuf;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Process-wide configuration, built once at startup and passed by
/// reference into the client, the lake writer and the orchestrator.
#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub youtube_base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub discovery_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("data_dir", &self.data_dir)
            .field("log_level", &self.log_level)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("discovery_path", &self.discovery_path)
            .finish()
    }
}

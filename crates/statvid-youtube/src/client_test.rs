use super::*;

fn test_client(base_url: &str) -> YouTubeClient {
    YouTubeClient::with_base_url("test-key", 30, base_url, RetryPolicy::immediate(0))
        .expect("client construction should not fail")
}

#[test]
fn build_url_puts_key_first_and_appends_resource() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client
        .build_url("videos", &[("part", "snippet"), ("id", "a,b")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/youtube/v3/videos?key=test-key&part=snippet&id=a%2Cb"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let client = test_client("https://www.googleapis.com/youtube/v3/");
    let url = client.build_url("search", &[("q", "x")]).unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/youtube/v3/search?key=test-key&q=x"
    );
}

#[test]
fn blank_api_key_is_rejected() {
    let result = YouTubeClient::with_base_url("  ", 30, "http://localhost", RetryPolicy::default());
    assert!(matches!(result, Err(YouTubeError::MissingApiKey)));
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = YouTubeClient::with_base_url("k", 30, "not a url", RetryPolicy::default());
    assert!(matches!(result, Err(YouTubeError::InvalidBaseUrl { .. })));
}

#[test]
fn new_requires_api_key_in_config() {
    let config = AppConfig {
        youtube_api_key: None,
        data_dir: "./data".into(),
        log_level: "INFO".to_owned(),
        youtube_base_url: statvid_core::app_config::DEFAULT_YOUTUBE_BASE_URL.to_owned(),
        request_timeout_secs: 30,
        max_retries: 3,
        retry_backoff_base_ms: 1500,
        discovery_path: None,
    };
    assert!(matches!(
        YouTubeClient::new(&config),
        Err(YouTubeError::MissingApiKey)
    ));
}

#[test]
fn new_uses_configured_retry_policy() {
    let config = AppConfig {
        youtube_api_key: Some("k".to_owned()),
        data_dir: "./data".into(),
        log_level: "INFO".to_owned(),
        youtube_base_url: statvid_core::app_config::DEFAULT_YOUTUBE_BASE_URL.to_owned(),
        request_timeout_secs: 30,
        max_retries: 5,
        retry_backoff_base_ms: 200,
        discovery_path: None,
    };
    let client = YouTubeClient::new(&config).unwrap();
    assert_eq!(client.retry_policy().max_retries, 5);
    assert_eq!(
        client.retry_policy().backoff_base,
        Duration::from_millis(200)
    );
}

#[test]
fn api_error_reads_reason_from_envelope() {
    let body = r#"{"error": {"code": 403, "message": "Quota exceeded", "errors": [{"reason": "quotaExceeded"}]}}"#;
    let err = api_error("search", 403, body);
    match err {
        YouTubeError::Api {
            status,
            reason,
            message,
            ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(reason, "quotaExceeded");
            assert_eq!(message, "Quota exceeded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn api_error_with_unparseable_body_keeps_status() {
    let err = api_error("videos", 502, "<html>bad gateway</html>");
    assert!(matches!(err, YouTubeError::Api { status: 502, ref reason, .. } if reason.is_empty()));
    assert!(err.is_transient());
}

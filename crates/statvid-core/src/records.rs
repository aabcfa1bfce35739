//! Flat, strongly-typed records produced by the API client boundary and
//! persisted to the bronze layer.
//!
//! Records are created per run from live API responses and never mutated
//! after being written; each pipeline stage emits a new artifact.

use chrono::{DateTime, Utc};

/// A single video's metadata and engagement counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<String>,
    pub channel_id: Option<String>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

/// A channel flattened from the nested API representation.
///
/// `subscriber_count` and `video_count` are coerced at the boundary: a
/// missing or non-numeric source value becomes `0`, never null.
/// `category_id`/`category_name` are assigned by the discovery orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub channel_id: String,
    pub title: String,
    pub country: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub uploads_playlist_id: Option<String>,
    pub category_id: Option<u32>,
    pub category_name: Option<String>,
}

impl ChannelRecord {
    /// Returns a copy tagged with the given category.
    #[must_use]
    pub fn with_category(mut self, id: u32, name: &str) -> Self {
        self.category_id = Some(id);
        self.category_name = Some(name.to_string());
        self
    }
}

/// One entry of a channel's uploads playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItemRecord {
    pub video_id: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub playlist_id: Option<String>,
}

/// One raw hit from a category search, persisted verbatim before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItemRecord {
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
    pub channel_title: Option<String>,
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// A channel that passed every discovery filter, with its activity signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedChannel {
    pub channel: ChannelRecord,
    pub uploads_last_year: u64,
    pub recent_video_ids: Vec<String>,
}

/// Parses an RFC 3339 timestamp as returned by the API.
///
/// Returns `None` for missing or malformed values.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

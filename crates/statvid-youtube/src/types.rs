//! YouTube Data API v3 response types.
//!
//! Only the nested paths discovery reads are modelled. Every nested group is
//! optional and defaults when absent so that a sparse item never fails the
//! whole page; numeric statistics are kept as raw JSON values because the
//! API encodes them as strings and may omit or hide them.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use statvid_core::records::parse_timestamp;

/// Envelope shared by every `list` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

// ---------------------------------------------------------------------------
// videos.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default)]
    pub view_count: Option<serde_json::Value>,
    #[serde(default)]
    pub like_count: Option<serde_json::Value>,
    #[serde(default)]
    pub comment_count: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// channels.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub snippet: Option<ChannelSnippet>,
    #[serde(default)]
    pub statistics: Option<ChannelStatistics>,
    #[serde(default)]
    pub content_details: Option<ChannelContentDetails>,
}

impl ChannelResource {
    /// The channel's uploads playlist id, if the API reported a non-empty one.
    #[must_use]
    pub fn uploads_playlist_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|cd| cd.related_playlists.as_ref())
            .and_then(|rp| rp.uploads.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default)]
    pub subscriber_count: Option<serde_json::Value>,
    #[serde(default)]
    pub video_count: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    #[serde(default)]
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedPlaylists {
    #[serde(default)]
    pub uploads: Option<String>,
}

// ---------------------------------------------------------------------------
// search.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<SearchResultId>,
    #[serde(default)]
    pub snippet: Option<SearchSnippet>,
}

impl SearchResult {
    /// Channel that published the hit: the snippet's `channelId`, falling
    /// back to the id block for channel-typed results.
    #[must_use]
    pub fn channel_id(&self) -> Option<&str> {
        self.snippet
            .as_ref()
            .and_then(|s| s.channel_id.as_deref())
            .or_else(|| self.id.as_ref().and_then(|id| id.channel_id.as_deref()))
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn video_id(&self) -> Option<&str> {
        self.id.as_ref().and_then(|id| id.video_id.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

// ---------------------------------------------------------------------------
// playlistItems.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    #[serde(default)]
    pub snippet: Option<PlaylistItemSnippet>,
    #[serde(default)]
    pub content_details: Option<PlaylistItemContentDetails>,
}

impl PlaylistItem {
    /// Video id from `contentDetails`, falling back to `snippet.resourceId`.
    #[must_use]
    pub fn video_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|cd| cd.video_id.as_deref())
            .or_else(|| {
                self.snippet
                    .as_ref()
                    .and_then(|s| s.resource_id.as_ref())
                    .and_then(|r| r.video_id.as_deref())
            })
            .filter(|id| !id.is_empty())
    }

    /// Publish time of the video: `contentDetails.videoPublishedAt` if present,
    /// otherwise `snippet.publishedAt`. The first non-null field wins; `None`
    /// when neither is present or the winning value does not parse.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self
            .content_details
            .as_ref()
            .and_then(|cd| cd.video_published_at.as_deref())
            .or_else(|| self.snippet.as_ref().and_then(|s| s.published_at.as_deref()))?;
        parse_timestamp(raw)
    }

    #[must_use]
    pub fn playlist_id(&self) -> Option<&str> {
        self.snippet.as_ref().and_then(|s| s.playlist_id.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub playlist_id: Option<String>,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_published_at: Option<String>,
}

// ---------------------------------------------------------------------------
// error envelope
// ---------------------------------------------------------------------------

/// Body returned with non-2xx statuses:
/// `{"error": {"code": 403, "message": "...", "errors": [{"reason": "..."}]}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn list_response_tolerates_missing_items_and_token() {
        let page: ListResponse<SearchResult> = serde_json::from_value(json!({})).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn search_result_channel_id_prefers_snippet() {
        let item: SearchResult = serde_json::from_value(json!({
            "id": {"kind": "youtube#video", "videoId": "v1", "channelId": "UC-id"},
            "snippet": {"channelId": "UC-snippet"}
        }))
        .unwrap();
        assert_eq!(item.channel_id(), Some("UC-snippet"));
        assert_eq!(item.video_id(), Some("v1"));
    }

    #[test]
    fn search_result_without_channel_is_none() {
        let item: SearchResult =
            serde_json::from_value(json!({"id": {"videoId": "v1"}, "snippet": {"channelId": ""}}))
                .unwrap();
        assert_eq!(item.channel_id(), None);
    }

    #[test]
    fn playlist_item_prefers_content_details_timestamp() {
        let item: PlaylistItem = serde_json::from_value(json!({
            "snippet": {"publishedAt": "2025-01-01T00:00:00Z", "resourceId": {"videoId": "snip"}},
            "contentDetails": {"videoId": "cd", "videoPublishedAt": "2024-12-31T10:00:00Z"}
        }))
        .unwrap();
        assert_eq!(
            item.published_at(),
            Some(Utc.with_ymd_and_hms(2024, 12, 31, 10, 0, 0).unwrap())
        );
        assert_eq!(item.video_id(), Some("cd"));
    }

    #[test]
    fn playlist_item_falls_back_to_snippet() {
        let item: PlaylistItem = serde_json::from_value(json!({
            "snippet": {"publishedAt": "2025-01-01T00:00:00Z", "resourceId": {"videoId": "snip"}}
        }))
        .unwrap();
        assert_eq!(
            item.published_at(),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(item.video_id(), Some("snip"));
    }

    #[test]
    fn playlist_item_without_timestamp_is_none() {
        let item: PlaylistItem = serde_json::from_value(json!({"contentDetails": {}})).unwrap();
        assert_eq!(item.published_at(), None);
        assert_eq!(item.video_id(), None);
    }

    #[test]
    fn uploads_playlist_id_absent_when_group_missing() {
        let channel: ChannelResource = serde_json::from_value(json!({"id": "UC1"})).unwrap();
        assert_eq!(channel.uploads_playlist_id(), None);
    }
}

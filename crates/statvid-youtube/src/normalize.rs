//! Flattening of nested API resources into the flat records persisted to
//! the bronze layer.

use serde_json::Value;
use statvid_core::records::parse_timestamp;
use statvid_core::{ChannelRecord, PlaylistItemRecord, SearchItemRecord, VideoRecord};

use crate::types::{ChannelResource, PlaylistItem, SearchResult, VideoResource};

/// Coerces a raw statistics value into a non-negative count.
///
/// Accepts decimal strings (the API's usual encoding) and JSON numbers.
/// Missing, negative, fractional-string or otherwise non-numeric values
/// become `0`.
#[must_use]
pub fn coerce_count(raw: Option<&Value>) -> u64 {
    match raw {
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map_or(0, |f| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let count = f as u64;
                    count
                })
        }),
        _ => 0,
    }
}

/// Flattens one channel resource.
///
/// An absent `snippet`, `statistics` or `contentDetails` group defaults every
/// column it would have supplied instead of failing.
#[must_use]
pub fn normalize_channel(resource: &ChannelResource) -> ChannelRecord {
    let snippet = resource.snippet.as_ref();
    let statistics = resource.statistics.as_ref();

    ChannelRecord {
        channel_id: resource.id.trim().to_string(),
        title: snippet
            .and_then(|s| s.title.clone())
            .unwrap_or_default(),
        country: snippet
            .and_then(|s| s.country.as_deref())
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        subscriber_count: coerce_count(statistics.and_then(|s| s.subscriber_count.as_ref())),
        video_count: coerce_count(statistics.and_then(|s| s.video_count.as_ref())),
        uploads_playlist_id: resource.uploads_playlist_id().map(str::to_string),
        category_id: None,
        category_name: None,
    }
}

/// Flattens a batch of channel resources, dropping entries without an id.
#[must_use]
pub fn normalize_channels(resources: &[ChannelResource]) -> Vec<ChannelRecord> {
    resources
        .iter()
        .filter(|r| {
            if r.id.trim().is_empty() {
                tracing::warn!("skipping channel resource without an id");
                false
            } else {
                true
            }
        })
        .map(normalize_channel)
        .collect()
}

#[must_use]
pub fn normalize_video(resource: &VideoResource) -> VideoRecord {
    let snippet = resource.snippet.as_ref();
    let statistics = resource.statistics.as_ref();

    VideoRecord {
        video_id: resource.id.clone(),
        title: snippet.and_then(|s| s.title.clone()).unwrap_or_default(),
        published_at: snippet
            .and_then(|s| s.published_at.as_deref())
            .and_then(parse_timestamp),
        category_id: snippet.and_then(|s| s.category_id.clone()),
        channel_id: snippet.and_then(|s| s.channel_id.clone()),
        view_count: coerce_count(statistics.and_then(|s| s.view_count.as_ref())),
        like_count: coerce_count(statistics.and_then(|s| s.like_count.as_ref())),
        comment_count: coerce_count(statistics.and_then(|s| s.comment_count.as_ref())),
    }
}

#[must_use]
pub fn normalize_search_item(item: &SearchResult) -> SearchItemRecord {
    let snippet = item.snippet.as_ref();
    SearchItemRecord {
        video_id: item.video_id().map(str::to_string),
        channel_id: item.channel_id().map(str::to_string),
        channel_title: snippet.and_then(|s| s.channel_title.clone()),
        title: snippet.and_then(|s| s.title.clone()),
        published_at: snippet
            .and_then(|s| s.published_at.as_deref())
            .and_then(parse_timestamp),
    }
}

#[must_use]
pub fn normalize_playlist_item(item: &PlaylistItem) -> PlaylistItemRecord {
    PlaylistItemRecord {
        video_id: item.video_id().map(str::to_string),
        published_at: item.published_at(),
        playlist_id: item.playlist_id().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn channel(value: serde_json::Value) -> ChannelResource {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn coerce_count_accepts_strings_and_numbers() {
        assert_eq!(coerce_count(Some(&json!("1234"))), 1234);
        assert_eq!(coerce_count(Some(&json!(77))), 77);
        assert_eq!(coerce_count(Some(&json!(12.9))), 12);
    }

    #[test]
    fn coerce_count_defaults_to_zero() {
        assert_eq!(coerce_count(None), 0);
        assert_eq!(coerce_count(Some(&json!("not-a-number"))), 0);
        assert_eq!(coerce_count(Some(&json!("-5"))), 0);
        assert_eq!(coerce_count(Some(&json!(-5))), 0);
        assert_eq!(coerce_count(Some(&json!(null))), 0);
        assert_eq!(coerce_count(Some(&json!({"nested": 1}))), 0);
    }

    #[test]
    fn non_numeric_subscriber_count_normalizes_to_zero() {
        let record = normalize_channel(&channel(json!({
            "id": "UC1",
            "snippet": {"title": "One", "country": "US"},
            "statistics": {"subscriberCount": "not-a-number", "videoCount": "42"},
            "contentDetails": {"relatedPlaylists": {"uploads": "UU1"}}
        })));
        assert_eq!(record.subscriber_count, 0);
        assert_eq!(record.video_count, 42);
        assert_eq!(record.country, "US");
        assert_eq!(record.uploads_playlist_id.as_deref(), Some("UU1"));
    }

    #[test]
    fn absent_groups_default_every_column() {
        let record = normalize_channel(&channel(json!({"id": "UC2"})));
        assert_eq!(record.channel_id, "UC2");
        assert_eq!(record.title, "");
        assert_eq!(record.country, "");
        assert_eq!(record.subscriber_count, 0);
        assert_eq!(record.video_count, 0);
        assert_eq!(record.uploads_playlist_id, None);
        assert_eq!(record.category_id, None);
    }

    #[test]
    fn empty_uploads_playlist_is_absent() {
        let record = normalize_channel(&channel(json!({
            "id": "UC3",
            "contentDetails": {"relatedPlaylists": {"uploads": ""}}
        })));
        assert_eq!(record.uploads_playlist_id, None);
    }

    #[test]
    fn normalize_channels_drops_items_without_id() {
        let records = normalize_channels(&[
            channel(json!({"id": "UC1"})),
            channel(json!({"snippet": {"title": "ghost"}})),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].channel_id, "UC1");
    }

    #[test]
    fn normalize_video_flattens_snippet_and_statistics() {
        let resource: VideoResource = serde_json::from_value(json!({
            "id": "vid1",
            "snippet": {
                "title": "Hello",
                "publishedAt": "2025-02-01T08:00:00Z",
                "categoryId": "20",
                "channelId": "UC1"
            },
            "statistics": {"viewCount": "1000", "likeCount": "50"}
        }))
        .unwrap();
        let record = normalize_video(&resource);
        assert_eq!(record.video_id, "vid1");
        assert_eq!(record.title, "Hello");
        assert_eq!(
            record.published_at,
            Some(Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap())
        );
        assert_eq!(record.category_id.as_deref(), Some("20"));
        assert_eq!(record.view_count, 1000);
        assert_eq!(record.like_count, 50);
        assert_eq!(record.comment_count, 0);
    }
}

//! Upload activity inside a trailing time window.

use chrono::{DateTime, Duration, Utc};
use statvid_youtube::PlaylistItem;

/// Counts uploads published at or after `now - lookback_days` and collects
/// their video ids in input order.
///
/// Items without a resolvable publish time are skipped. An item that counts
/// but carries no video id still counts.
#[must_use]
pub fn count_recent_uploads(
    items: &[PlaylistItem],
    lookback_days: u32,
    now: DateTime<Utc>,
) -> (u64, Vec<String>) {
    let cutoff = now - Duration::days(i64::from(lookback_days));
    let mut count = 0u64;
    let mut video_ids = Vec::new();

    for item in items {
        let Some(published_at) = item.published_at() else {
            continue;
        };
        if published_at < cutoff {
            continue;
        }
        count += 1;
        if let Some(id) = item.video_id() {
            video_ids.push(id.to_owned());
        }
    }

    (count, video_ids)
}

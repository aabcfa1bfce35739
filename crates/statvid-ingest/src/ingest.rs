//! Ad-hoc video ingestion into `videos/`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use statvid_lake::LakeWriter;
use statvid_youtube::YouTubeClient;

use crate::error::DiscoveryError;

/// Fetches metadata for `video_ids` and writes one videos artifact.
///
/// Returns `Ok(None)` without writing when the API returns no videos.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if a lookup fails after retries or the artifact
/// cannot be written.
pub async fn ingest_videos<S: AsRef<str>>(
    client: &YouTubeClient,
    lake: &LakeWriter,
    video_ids: &[S],
    at: DateTime<Utc>,
) -> Result<Option<PathBuf>, DiscoveryError> {
    let videos = client.fetch_video_metadata(video_ids).await?;
    if videos.is_empty() {
        tracing::warn!(requested = video_ids.len(), "no videos returned");
        return Ok(None);
    }

    let path = lake.write_videos(&videos, at)?;
    tracing::info!(videos = videos.len(), path = %path.display(), "videos ingested");
    Ok(Some(path))
}

/// Ingests up to `limit` of a channel's most recent uploads.
///
/// # Errors
///
/// Same as [`ingest_videos`], plus failures resolving the uploads playlist.
pub async fn ingest_channel(
    client: &YouTubeClient,
    lake: &LakeWriter,
    channel_id: &str,
    limit: usize,
    at: DateTime<Utc>,
) -> Result<Option<PathBuf>, DiscoveryError> {
    let video_ids = client.search_channel_uploads(channel_id, limit).await?;
    tracing::info!(channel_id, uploads = video_ids.len(), "channel uploads listed");
    if video_ids.is_empty() {
        return Ok(None);
    }
    ingest_videos(client, lake, video_ids.as_slice(), at).await
}

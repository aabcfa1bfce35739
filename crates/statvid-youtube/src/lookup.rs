//! Id-batch lookup endpoints: `videos.list` and `channels.list`.

use std::collections::HashSet;

use statvid_core::VideoRecord;

use crate::client::YouTubeClient;
use crate::error::YouTubeError;
use crate::normalize::normalize_video;
use crate::types::{ChannelResource, ListResponse, VideoResource};

/// Hard limit of the API for id-based `list` calls.
pub const MAX_IDS_PER_CALL: usize = 50;

const LOOKUP_PARTS: &str = "snippet,statistics,contentDetails";

/// Drops blank ids and repeats, keeping first-seen order.
fn distinct_ids<S: AsRef<str>>(ids: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .collect()
}

impl YouTubeClient {
    /// Fetches snippet, statistics and content details for the given videos.
    ///
    /// Ids are de-duplicated, blank ids dropped, and the rest sent in chunks
    /// of [`MAX_IDS_PER_CALL`]; results are concatenated in chunk order.
    ///
    /// # Errors
    ///
    /// Returns the first chunk's [`YouTubeError`] once retries are exhausted.
    pub async fn fetch_video_metadata<S: AsRef<str>>(
        &self,
        video_ids: &[S],
    ) -> Result<Vec<VideoRecord>, YouTubeError> {
        let resources: Vec<VideoResource> = self.lookup_by_ids("videos", video_ids).await?;
        Ok(resources.iter().map(normalize_video).collect())
    }

    /// Fetches snippet, statistics and content details for the given channels.
    ///
    /// Chunking follows [`Self::fetch_video_metadata`]. The raw resources are
    /// returned for [`crate::normalize_channels`] to flatten.
    ///
    /// # Errors
    ///
    /// Returns the first chunk's [`YouTubeError`] once retries are exhausted.
    pub async fn fetch_channel_metadata<S: AsRef<str>>(
        &self,
        channel_ids: &[S],
    ) -> Result<Vec<ChannelResource>, YouTubeError> {
        self.lookup_by_ids("channels", channel_ids).await
    }

    /// Returns the uploads playlist id for a channel, or `None` if the channel
    /// does not exist or reports no uploads playlist.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError`] if the request fails after retries.
    pub async fn get_uploads_playlist_id(
        &self,
        channel_id: &str,
    ) -> Result<Option<String>, YouTubeError> {
        let page: ListResponse<ChannelResource> = self
            .get_json(
                "channels",
                &[
                    ("part", "contentDetails"),
                    ("id", channel_id),
                    ("maxResults", "1"),
                ],
            )
            .await?;
        Ok(page
            .items
            .first()
            .and_then(ChannelResource::uploads_playlist_id)
            .map(str::to_owned))
    }

    async fn lookup_by_ids<T, S>(&self, resource: &str, ids: &[S]) -> Result<Vec<T>, YouTubeError>
    where
        T: serde::de::DeserializeOwned,
        S: AsRef<str>,
    {
        let ids = distinct_ids(ids);
        let mut results: Vec<T> = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_IDS_PER_CALL) {
            let joined = chunk.join(",");
            let max_results = chunk.len().to_string();
            let page: ListResponse<T> = self
                .get_json(
                    resource,
                    &[
                        ("part", LOOKUP_PARTS),
                        ("id", joined.as_str()),
                        ("maxResults", max_results.as_str()),
                    ],
                )
                .await?;
            tracing::debug!(
                resource,
                requested = chunk.len(),
                returned = page.items.len(),
                "id lookup chunk"
            );
            results.extend(page.items);
        }

        Ok(results)
    }
}

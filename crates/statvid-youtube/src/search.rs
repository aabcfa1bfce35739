//! Paginated endpoints: `search.list` and `playlistItems.list`.

use chrono::{DateTime, SecondsFormat, Utc};
use statvid_core::SearchOrder;

use crate::client::YouTubeClient;
use crate::error::YouTubeError;
use crate::lookup::MAX_IDS_PER_CALL;
use crate::pagination::{collect_pages, next_token};
use crate::types::{ListResponse, PlaylistItem, SearchResult};

/// Guard against playlists whose tokens never run out.
const MAX_UPLOAD_PAGES: usize = 200;

impl YouTubeClient {
    /// Searches videos in a category, following continuation tokens for up to
    /// `max_pages` pages of 50 results.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError`] if any page fails after retries.
    pub async fn search_videos_by_category(
        &self,
        category_id: u32,
        region_code: &str,
        max_pages: usize,
        order: SearchOrder,
        published_after: Option<DateTime<Utc>>,
    ) -> Result<Vec<SearchResult>, YouTubeError> {
        let category = category_id.to_string();
        let published_after =
            published_after.map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true));
        let category = category.as_str();
        let published_after = published_after.as_deref();

        let items = collect_pages("search", max_pages, move |token| async move {
            let page_size = MAX_IDS_PER_CALL.to_string();
            let mut params: Vec<(&str, &str)> = vec![
                ("part", "id,snippet"),
                ("type", "video"),
                ("videoCategoryId", category),
                ("maxResults", page_size.as_str()),
                ("regionCode", region_code),
                ("order", order.as_str()),
            ];
            if let Some(after) = published_after {
                params.push(("publishedAfter", after));
            }
            if let Some(token) = token.as_deref() {
                params.push(("pageToken", token));
            }
            self.get_json::<ListResponse<SearchResult>>("search", &params)
                .await
        })
        .await?;

        tracing::debug!(category_id, items = items.len(), "category search complete");
        Ok(items)
    }

    /// Fetches playlist items with pagination, `page_size` per page for up to
    /// `max_pages` pages.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError`] if any page fails after retries.
    pub async fn fetch_playlist_items(
        &self,
        playlist_id: &str,
        page_size: usize,
        max_pages: usize,
    ) -> Result<Vec<PlaylistItem>, YouTubeError> {
        let page_size = page_size.clamp(1, MAX_IDS_PER_CALL).to_string();
        let page_size = page_size.as_str();

        collect_pages("playlistItems", max_pages, move |token| async move {
            self.playlist_page(playlist_id, page_size, token.as_deref())
                .await
        })
        .await
    }

    /// Returns up to `limit` video ids from a channel's uploads playlist, in
    /// playlist order.
    ///
    /// Pages are requested only until `limit` ids are collected or the
    /// playlist is exhausted. A channel without an uploads playlist yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError`] if the channel lookup or any page fails after
    /// retries.
    pub async fn search_channel_uploads(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, YouTubeError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let Some(playlist_id) = self.get_uploads_playlist_id(channel_id).await? else {
            tracing::warn!(channel_id, "channel has no uploads playlist");
            return Ok(Vec::new());
        };

        let page_size = limit.min(MAX_IDS_PER_CALL).to_string();
        let mut video_ids: Vec<String> = Vec::with_capacity(limit);
        let mut token: Option<String> = None;

        for _ in 0..MAX_UPLOAD_PAGES {
            let page = self
                .playlist_page(&playlist_id, &page_size, token.as_deref())
                .await?;

            for item in &page.items {
                if let Some(id) = item.video_id() {
                    video_ids.push(id.to_owned());
                    if video_ids.len() >= limit {
                        return Ok(video_ids);
                    }
                }
            }

            token = next_token(page.next_page_token);
            if token.is_none() {
                return Ok(video_ids);
            }
        }

        tracing::warn!(
            channel_id,
            collected = video_ids.len(),
            limit,
            "uploads page guard reached; returning partial list"
        );
        Ok(video_ids)
    }

    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_size: &str,
        token: Option<&str>,
    ) -> Result<ListResponse<PlaylistItem>, YouTubeError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", page_size),
        ];
        if let Some(token) = token {
            params.push(("pageToken", token));
        }
        self.get_json("playlistItems", &params).await
    }
}

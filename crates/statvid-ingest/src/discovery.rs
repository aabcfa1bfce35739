//! Per-category channel discovery.
//!
//! Stages run strictly in order and each one persists its output before the
//! next starts:
//!
//! 1. search the category and write the raw hits
//! 2. reduce hits to distinct channel ids
//! 3. look up channel metadata for the overfetched pool and write it
//! 4. keep channels above the subscriber floor, in the target region and with
//!    an uploads playlist
//! 5. fetch each survivor's recent uploads (written per channel) and keep the
//!    active ones
//! 6. balanced selection, written per category
//!
//! Any stage that leaves nothing to work with ends the category with `None`.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use statvid_core::{Category, ChannelRecord, DiscoverySettings, SelectedChannel};
use statvid_lake::LakeWriter;
use statvid_youtube::{
    normalize_channels, normalize_playlist_item, normalize_search_item, SearchResult,
    YouTubeClient,
};

use crate::activity::count_recent_uploads;
use crate::error::DiscoveryError;
use crate::selector::select_balanced;

/// Items per uploads page during the activity check.
const ACTIVITY_PAGE_SIZE: usize = 50;
const ACTIVITY_MAX_PAGES: usize = 5;

/// Discovery driver sharing one client, lake writer and settings across
/// categories.
pub struct Discovery<'a> {
    pub(crate) client: &'a YouTubeClient,
    pub(crate) lake: &'a LakeWriter,
    pub(crate) settings: &'a DiscoverySettings,
}

impl<'a> Discovery<'a> {
    #[must_use]
    pub fn new(
        client: &'a YouTubeClient,
        lake: &'a LakeWriter,
        settings: &'a DiscoverySettings,
    ) -> Self {
        Self {
            client,
            lake,
            settings,
        }
    }

    /// Runs every discovery stage for one category.
    ///
    /// Returns `Ok(None)` when the category ends empty at any stage; the
    /// reason is logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] if the search or channel lookup fails after
    /// retries, or an artifact cannot be written. Failures fetching a single
    /// channel's uploads are logged and that channel is skipped.
    pub async fn discover_category(
        &self,
        category: Category,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<SelectedChannel>>, DiscoveryError> {
        let settings = self.settings;
        let published_after = settings
            .search_window_days
            .map(|days| now - Duration::days(i64::from(days)));

        let hits = self
            .client
            .search_videos_by_category(
                category.id,
                &settings.region_code,
                settings.search_max_pages,
                settings.search_order,
                published_after,
            )
            .await?;
        let search_rows: Vec<_> = hits.iter().map(normalize_search_item).collect();
        self.lake.write_search(category.id, &search_rows)?;

        let mut channel_ids = dedup_channel_ids(&hits);
        if channel_ids.is_empty() {
            tracing::warn!(category_id = category.id, "no channels found in search results");
            return Ok(None);
        }
        channel_ids.truncate(overfetch_limit(
            settings.target_per_category,
            settings.overfetch_factor,
            channel_ids.len(),
        ));

        let resources = self.client.fetch_channel_metadata(channel_ids.as_slice()).await?;
        let channels: Vec<ChannelRecord> = normalize_channels(&resources)
            .into_iter()
            .map(|c| c.with_category(category.id, category.name))
            .collect();
        self.lake.write_channels(category.id, &channels)?;
        tracing::info!(
            category_id = category.id,
            hits = hits.len(),
            channels = channels.len(),
            "channel metadata fetched"
        );

        let eligible = filter_eligible(channels, settings.min_subscribers, &settings.region_code);
        if eligible.is_empty() {
            tracing::warn!(
                category_id = category.id,
                min_subscribers = settings.min_subscribers,
                region = %settings.region_code,
                "no channels passed the eligibility filter"
            );
            return Ok(None);
        }

        let active = self.active_channels(eligible, now).await?;
        if active.is_empty() {
            tracing::warn!(
                category_id = category.id,
                min_recent_uploads = settings.min_recent_uploads,
                lookback_days = settings.lookback_days,
                "no channels passed the activity check"
            );
            return Ok(None);
        }

        let selection = select_balanced(&active, settings.target_per_category);
        self.lake.write_category_selection(category.id, &selection)?;
        tracing::info!(
            category = %category,
            active = active.len(),
            selected = selection.len(),
            target = settings.target_per_category,
            "category selection written"
        );

        Ok(Some(selection))
    }

    /// Fetches each channel's recent uploads, persists them and keeps the
    /// channels meeting the upload threshold.
    async fn active_channels(
        &self,
        channels: Vec<ChannelRecord>,
        now: DateTime<Utc>,
    ) -> Result<Vec<SelectedChannel>, DiscoveryError> {
        let mut active = Vec::new();

        for channel in channels {
            let Some(playlist_id) = channel.uploads_playlist_id.as_deref() else {
                continue;
            };
            let items = match self
                .client
                .fetch_playlist_items(playlist_id, ACTIVITY_PAGE_SIZE, ACTIVITY_MAX_PAGES)
                .await
            {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(
                        channel_id = %channel.channel_id,
                        error = %e,
                        "skipping channel, failed to fetch uploads"
                    );
                    continue;
                }
            };

            let rows: Vec<_> = items.iter().map(normalize_playlist_item).collect();
            self.lake.write_uploads(&channel.channel_id, &rows)?;

            let (uploads_last_year, recent_video_ids) =
                count_recent_uploads(&items, self.settings.lookback_days, now);
            tracing::debug!(
                channel_id = %channel.channel_id,
                uploads = items.len(),
                recent = uploads_last_year,
                "activity checked"
            );
            if uploads_last_year >= self.settings.min_recent_uploads {
                active.push(SelectedChannel {
                    channel,
                    uploads_last_year,
                    recent_video_ids,
                });
            }
        }

        Ok(active)
    }
}

/// Channel ids from search hits, first-seen order, without blanks or repeats.
#[must_use]
pub fn dedup_channel_ids(hits: &[SearchResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    hits.iter()
        .filter_map(SearchResult::channel_id)
        .filter(|id| seen.insert(*id))
        .map(str::to_owned)
        .collect()
}

/// Size of the channel lookup pool: `max(target * overfetch_factor, available)`.
#[must_use]
pub fn overfetch_limit(target: usize, overfetch_factor: usize, available: usize) -> usize {
    target.saturating_mul(overfetch_factor).max(available)
}

/// Keeps channels with at least `min_subscribers`, an uploads playlist and a
/// country matching `region_code`.
#[must_use]
pub fn filter_eligible(
    channels: Vec<ChannelRecord>,
    min_subscribers: u64,
    region_code: &str,
) -> Vec<ChannelRecord> {
    channels
        .into_iter()
        .filter(|c| {
            c.subscriber_count >= min_subscribers
                && c
                    .uploads_playlist_id
                    .as_deref()
                    .is_some_and(|id| !id.trim().is_empty())
                && c.country.eq_ignore_ascii_case(region_code)
        })
        .collect()
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;

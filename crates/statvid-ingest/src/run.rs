//! Top-level discovery run across all configured categories.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use statvid_core::SelectedChannel;
use uuid::Uuid;

use crate::discovery::Discovery;
use crate::error::DiscoveryError;

/// Outcome of a discovery run that produced at least one selection.
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: Uuid,
    /// Every category's selection, concatenated in category order.
    pub selections: Vec<SelectedChannel>,
    pub categories_attempted: usize,
    pub categories_selected: usize,
    /// Path of the combined selection artifact.
    pub artifact: PathBuf,
}

impl Discovery<'_> {
    /// Discovers every configured category with a fresh run id.
    ///
    /// # Errors
    ///
    /// See [`Discovery::run_at`].
    pub async fn run(&self) -> Result<RunSummary, DiscoveryError> {
        self.run_at(Uuid::new_v4(), Utc::now()).await
    }

    /// Discovers every configured category in order and writes the combined
    /// selection.
    ///
    /// A failing or empty category is logged and left out of the combined
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::NoResults`] if no category produced a
    /// selection (nothing is written in that case), or the lake error if the
    /// combined artifact cannot be written.
    pub async fn run_at(
        &self,
        run_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<RunSummary, DiscoveryError> {
        let categories = self.settings.categories();
        tracing::info!(
            %run_id,
            categories = categories.len(),
            target = self.settings.target_per_category,
            "discovery run started"
        );

        let mut selections: Vec<SelectedChannel> = Vec::new();
        let mut categories_selected = 0usize;

        for category in &categories {
            match self.discover_category(*category, now).await {
                Ok(Some(selection)) => {
                    categories_selected += 1;
                    selections.extend(selection);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(
                        %run_id,
                        category_id = category.id,
                        error = %e,
                        "category discovery failed"
                    );
                }
            }
        }

        if selections.is_empty() {
            return Err(DiscoveryError::NoResults {
                categories: categories.len(),
            });
        }

        let artifact = self
            .lake
            .write_combined_selection(&selections, run_id, now)?;
        tracing::info!(
            %run_id,
            categories_selected,
            channels = selections.len(),
            path = %artifact.display(),
            "discovery run complete"
        );

        Ok(RunSummary {
            run_id,
            selections,
            categories_attempted: categories.len(),
            categories_selected,
            artifact,
        })
    }
}

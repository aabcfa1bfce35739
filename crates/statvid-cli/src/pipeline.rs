//! `run`, `features` and `train` handlers.

use statvid_core::{AppConfig, DiscoverySettings};

use crate::ModelKind;

/// Runs discovery with `limit` channels per category, then the downstream
/// stages.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the API key is missing, or
/// every category came back empty.
pub(crate) async fn run_pipeline(
    config: &AppConfig,
    limit: usize,
    model: ModelKind,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut settings = statvid_core::load_discovery_settings(config.discovery_path.as_deref())?;
    settings.target_per_category = limit;
    settings.validate()?;

    if dry_run {
        print_plan(config, &settings);
        println!("dry-run: would then build features and train a {model} model");
        return Ok(());
    }

    crate::ingest::run_discovery(config, &settings).await?;
    run_features();
    run_train(model);
    Ok(())
}

pub(crate) fn run_features() {
    tracing::warn!("feature engineering is not implemented yet; skipping");
}

pub(crate) fn run_train(model: ModelKind) {
    tracing::warn!(%model, "model training is not implemented yet; skipping");
}

/// Prints what a discovery run would do with `settings`.
pub(crate) fn print_plan(config: &AppConfig, settings: &DiscoverySettings) {
    let categories = settings.categories();
    println!(
        "dry-run: would discover up to {} channels in each of {} categories (region {})",
        settings.target_per_category,
        categories.len(),
        settings.region_code
    );
    for category in &categories {
        println!("  - {category}");
    }
    println!(
        "  thresholds: >= {} subscribers, >= {} uploads in {} days, {} search pages ordered by {}",
        settings.min_subscribers,
        settings.min_recent_uploads,
        settings.lookback_days,
        settings.search_max_pages,
        settings.search_order
    );
    println!(
        "  artifacts under {}",
        statvid_lake::DataPaths::new(&config.data_dir)
            .youtube_bronze()
            .display()
    );
}

//! `ingest` sub-commands: discovery, video lookup and channel uploads.

use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use statvid_core::{AppConfig, DiscoverySettings};
use statvid_ingest::{ingest_channel, ingest_videos, Discovery};
use statvid_lake::{DataPaths, LakeWriter};
use statvid_youtube::YouTubeClient;

/// Sub-commands available under `ingest`.
#[derive(Debug, Subcommand)]
pub enum IngestCommands {
    /// Discover balanced channel selections per category (default)
    Discover {
        /// Category id to include; repeat for several (defaults to all)
        #[arg(long = "category")]
        categories: Vec<u32>,
        /// Channels to select per category
        #[arg(long)]
        target: Option<usize>,
        /// Print the discovery plan without calling the API or writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch metadata for specific videos
    Videos {
        /// Video id; repeat for several
        #[arg(long = "id", required = true)]
        ids: Vec<String>,
    },
    /// Fetch a channel's most recent uploads
    Channel {
        /// Channel id
        #[arg(long)]
        id: String,
        /// Maximum uploads to fetch
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
}

impl Default for IngestCommands {
    fn default() -> Self {
        Self::Discover {
            categories: Vec::new(),
            target: None,
            dry_run: false,
        }
    }
}

pub(crate) async fn run_ingest(config: &AppConfig, command: IngestCommands) -> anyhow::Result<()> {
    match command {
        IngestCommands::Discover {
            categories,
            target,
            dry_run,
        } => {
            let mut settings =
                statvid_core::load_discovery_settings(config.discovery_path.as_deref())?;
            if !categories.is_empty() {
                settings.categories = Some(categories);
            }
            if let Some(target) = target {
                settings.target_per_category = target;
            }
            settings.validate()?;

            if dry_run {
                crate::pipeline::print_plan(config, &settings);
                return Ok(());
            }
            run_discovery(config, &settings).await
        }
        IngestCommands::Videos { ids } => {
            let (client, lake) = connect(config)?;
            match ingest_videos(&client, &lake, ids.as_slice(), Utc::now()).await? {
                Some(path) => println!("wrote {}", path.display()),
                None => println!("no videos returned for {} id(s)", ids.len()),
            }
            Ok(())
        }
        IngestCommands::Channel { id, limit } => {
            let (client, lake) = connect(config)?;
            match ingest_channel(&client, &lake, &id, limit, Utc::now()).await? {
                Some(path) => println!("wrote {}", path.display()),
                None => println!("channel {id} has no uploads to ingest"),
            }
            Ok(())
        }
    }
}

/// Runs one discovery across the configured categories and prints a summary.
///
/// # Errors
///
/// Returns an error if the client cannot be built or no category produced a
/// selection.
pub(crate) async fn run_discovery(
    config: &AppConfig,
    settings: &DiscoverySettings,
) -> anyhow::Result<()> {
    let (client, lake) = connect(config)?;
    let summary = Discovery::new(&client, &lake, settings)
        .run()
        .await
        .context("channel discovery failed")?;

    println!(
        "run {}: selected {} channels across {}/{} categories -> {}",
        summary.run_id,
        summary.selections.len(),
        summary.categories_selected,
        summary.categories_attempted,
        summary.artifact.display()
    );
    Ok(())
}

fn connect(config: &AppConfig) -> anyhow::Result<(YouTubeClient, LakeWriter)> {
    let client = YouTubeClient::new(config).context("failed to build YouTube client")?;
    let paths = DataPaths::new(&config.data_dir);
    paths.ensure()?;
    Ok((client, LakeWriter::new(&paths)))
}

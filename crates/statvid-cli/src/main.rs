mod ingest;
mod pipeline;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::ingest::IngestCommands;

#[derive(Debug, Parser)]
#[command(name = "statvid")]
#[command(about = "YouTube channel discovery and ingestion")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline: discovery, then features and training
    Run {
        /// Channels to select per category
        #[arg(long, default_value_t = 100)]
        limit: usize,
        /// Model to train once features exist
        #[arg(long, value_enum, default_value_t = ModelKind::Ridge)]
        model: ModelKind,
        /// Print the discovery plan without calling the API or writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch data from the YouTube API into the bronze layer
    Ingest {
        #[command(subcommand)]
        command: Option<IngestCommands>,
    },
    /// Build features from the bronze layer
    Features,
    /// Train a model on the built features
    Train {
        #[arg(long, value_enum, default_value_t = ModelKind::Ridge)]
        model: ModelKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModelKind {
    Ridge,
    Lightgbm,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ModelKind::Ridge => "ridge",
            ModelKind::Lightgbm => "lightgbm",
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = statvid_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.to_lowercase()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Run {
            limit,
            model,
            dry_run,
        }) => pipeline::run_pipeline(&config, limit, model, dry_run).await,
        Some(Commands::Ingest { command }) => {
            ingest::run_ingest(&config, command.unwrap_or_default()).await
        }
        Some(Commands::Features) => {
            pipeline::run_features();
            Ok(())
        }
        Some(Commands::Train { model }) => {
            pipeline::run_train(model);
            Ok(())
        }
        None => {
            println!("statvid: pass --help for available commands");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;

//! Shared configuration, category table and record types for the
//! `statvid` ingestion pipeline.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod records;
pub mod settings;

use thiserror::Error;

pub use app_config::AppConfig;
pub use categories::{category, category_name, Category, CATEGORIES};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{
    parse_timestamp, ChannelRecord, PlaylistItemRecord, SearchItemRecord, SelectedChannel,
    VideoRecord,
};
pub use settings::{load_discovery_settings, DiscoverySettings, SearchOrder};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read discovery settings file {path}: {source}")]
    SettingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse discovery settings file: {0}")]
    SettingsFileParse(#[source] serde_yaml::Error),

    #[error("invalid discovery settings: {0}")]
    Validation(String),
}

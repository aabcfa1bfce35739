//! Channel discovery and video ingestion on top of the YouTube client and
//! the bronze lake writer.

pub mod activity;
pub mod discovery;
pub mod error;
pub mod ingest;
pub mod run;
pub mod selector;

pub use activity::count_recent_uploads;
pub use discovery::{dedup_channel_ids, filter_eligible, overfetch_limit, Discovery};
pub use error::DiscoveryError;
pub use ingest::{ingest_channel, ingest_videos};
pub use run::RunSummary;
pub use selector::select_balanced;

//! Bronze-layer persistence for the ingestion pipeline.
//!
//! Every artifact is a single parquet file under `<data_dir>/bronze/youtube/`
//! keyed by category id, channel id or a UTC timestamp. Files are never
//! patched in place: a write lands in a temp file first and is renamed over
//! any previous artifact with the same key.

pub mod error;
pub mod paths;
pub mod read;
pub mod schema;
pub mod writer;

pub use error::LakeError;
pub use paths::DataPaths;
pub use read::{count_rows, read_batches};
pub use schema::{with_run_id, LakeRecord};
pub use writer::{artifact_timestamp, LakeWriter};

use statvid_lake::LakeError;
use statvid_youtube::YouTubeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("YouTube API error: {0}")]
    YouTube(#[from] YouTubeError),

    #[error("lake write failed: {0}")]
    Lake(#[from] LakeError),

    #[error("no category produced a selection ({categories} attempted)")]
    NoResults { categories: usize },
}

//! Client for the subset of the YouTube Data API v3 that channel discovery
//! depends on: video lookup, channel lookup, search and playlist items.

pub mod client;
pub mod error;
mod lookup;
pub mod normalize;
mod pagination;
pub mod retry;
mod search;
pub mod types;

pub use client::YouTubeClient;
pub use error::{FailureKind, YouTubeError};
pub use lookup::MAX_IDS_PER_CALL;
pub use normalize::{
    coerce_count, normalize_channel, normalize_channels, normalize_playlist_item,
    normalize_search_item, normalize_video,
};
pub use retry::RetryPolicy;
pub use types::{ChannelResource, ListResponse, PlaylistItem, SearchResult, VideoResource};

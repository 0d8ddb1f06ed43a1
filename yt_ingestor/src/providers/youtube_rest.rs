//! YouTube Data API v3 implementation of [`MetadataProvider`](super::MetadataProvider).

pub mod provider;
pub mod response;

pub use provider::YouTubeProvider;

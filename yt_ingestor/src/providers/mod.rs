//! Provider abstraction for video-platform metadata sources.
//!
//! This module defines the [`MetadataProvider`] trait, a unified interface
//! for the three upstream operations the pipeline needs: batched channel
//! lookup, batched video lookup, and page-at-a-time playlist listing.
//!
//! The concrete [`youtube_rest::YouTubeProvider`] talks to the YouTube
//! Data API v3; the extractors only ever see `&dyn MetadataProvider`, so
//! tests substitute canned providers without touching the network.

pub mod errors;
pub mod youtube_rest;

use async_trait::async_trait;

pub use errors::{ProviderError, ProviderInitError};

use crate::models::{PlaylistItemsPage, RawChannel, RawVideo};

#[async_trait]
pub trait MetadataProvider {
    /// Fetches channel details for the given channel ids, batching requests
    /// as the upstream API requires. Unknown ids are simply absent from the
    /// result; order follows the upstream response order.
    async fn list_channels(&self, ids: &[String]) -> Result<Vec<RawChannel>, ProviderError>;

    /// Fetches full video details for the given video ids, batched.
    async fn list_videos(&self, ids: &[String]) -> Result<Vec<RawVideo>, ProviderError>;

    /// Fetches one page of a playlist's items.
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, ProviderError>;
}

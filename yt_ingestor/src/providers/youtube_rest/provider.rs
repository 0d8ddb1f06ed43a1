use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use shared_utils::config;

use crate::models::{PlaylistItemsPage, RawChannel, RawVideo};
use crate::providers::youtube_rest::response::ListResponse;
use crate::providers::{MetadataProvider, ProviderError, ProviderInitError};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The API accepts at most 50 ids per `channels.list`/`videos.list` call.
const MAX_IDS_PER_REQUEST: usize = 50;

/// Maximum `playlistItems.list` page size.
const PAGE_SIZE: &str = "50";

/// The parts requested for channel and video items.
const ITEM_PARTS: &str = "snippet,statistics,contentDetails";

pub struct YouTubeProvider {
    client: Client,
    api_key: SecretString,
}

impl YouTubeProvider {
    /// Creates a new YouTube Data API provider.
    ///
    /// Reads the API key from the `YT_API_KEY` environment variable; its
    /// absence is fatal here, before any request is made.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(config::api_key()?.into());
        let client = Client::builder().build()?;
        Ok(Self { client, api_key })
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<ListResponse<T>, ProviderError> {
        let response = self
            .client
            .get(format!("{BASE_URL}/{endpoint}"))
            .query(query)
            .query(&[("key", self.api_key.expose_secret())])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api(error_msg));
        }

        Ok(response.json::<ListResponse<T>>().await?)
    }

    /// Runs one list endpoint over chunks of at most 50 ids, concatenating
    /// the items in response order.
    async fn list_by_ids<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        ids: &[String],
    ) -> Result<Vec<T>, ProviderError> {
        let mut all_items = Vec::with_capacity(ids.len());
        for batch in chunk_ids(ids, MAX_IDS_PER_REQUEST) {
            let joined = batch.join(",");
            let response: ListResponse<T> = self
                .get_list(endpoint, &[("part", ITEM_PARTS), ("id", &joined)])
                .await?;
            all_items.extend(response.items);
        }
        Ok(all_items)
    }
}

#[async_trait]
impl MetadataProvider for YouTubeProvider {
    async fn list_channels(&self, ids: &[String]) -> Result<Vec<RawChannel>, ProviderError> {
        self.list_by_ids("channels", ids).await
    }

    async fn list_videos(&self, ids: &[String]) -> Result<Vec<RawVideo>, ProviderError> {
        self.list_by_ids("videos", ids).await
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, ProviderError> {
        let mut query = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", PAGE_SIZE),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self.get_list("playlistItems", &query).await?;
        Ok(PlaylistItemsPage {
            items: response.items,
            next_page_token: response.next_page_token,
        })
    }
}

/// Splits a list of ids into chunks of at most `size`.
fn chunk_ids(ids: &[String], size: usize) -> impl Iterator<Item = &[String]> {
    ids.chunks(size)
}

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{info, warn};

use shared_utils::config::ConfigError;
use shared_utils::layout::{DataLayout, Dataset};

use crate::errors::Error;
use crate::extract::write_raw_items;
use crate::models::RawVideo;
use crate::providers::{MetadataProvider, ProviderError};

/// For each channel, fetches all (or up to `max_videos_per_channel`) of
/// its uploaded videos and saves the combined raw JSON under the
/// run-date partition for `run_date`.
///
/// A channel with no resolvable uploads playlist, or zero videos,
/// contributes nothing and does not abort the run.
pub async fn fetch_videos_for_channels(
    provider: &dyn MetadataProvider,
    layout: &DataLayout,
    channel_ids: &[String],
    run_date: NaiveDate,
    max_videos_per_channel: Option<usize>,
) -> Result<PathBuf, Error> {
    if channel_ids.is_empty() {
        return Err(ConfigError::EmptyChannelList.into());
    }

    let mut all_video_items: Vec<RawVideo> = Vec::new();

    for channel_id in channel_ids {
        info!(%channel_id, "processing channel");

        let Some(playlist_id) = uploads_playlist_id(provider, channel_id).await? else {
            warn!(%channel_id, "no uploads playlist, skipping channel");
            continue;
        };

        let video_ids =
            collect_video_ids(provider, &playlist_id, max_videos_per_channel).await?;
        info!(%channel_id, count = video_ids.len(), "found videos");
        if video_ids.is_empty() {
            continue;
        }

        let video_items = provider.list_videos(&video_ids).await?;
        info!(%channel_id, count = video_items.len(), "retrieved video details");
        all_video_items.extend(video_items);
    }

    let output_path = layout.raw_file(Dataset::Videos, run_date);
    write_raw_items(&output_path, &all_video_items)?;

    info!(
        count = all_video_items.len(),
        path = %output_path.display(),
        "saved raw videos"
    );
    Ok(output_path)
}

/// Resolves a channel's uploads playlist id, or `None` when the channel
/// is unknown or has no uploads playlist.
async fn uploads_playlist_id(
    provider: &dyn MetadataProvider,
    channel_id: &str,
) -> Result<Option<String>, ProviderError> {
    let channels = provider.list_channels(&[channel_id.to_string()]).await?;
    Ok(channels
        .first()
        .and_then(|ch| ch.uploads_playlist_id())
        .map(str::to_string))
}

/// Walks a playlist page by page, collecting video ids until the
/// playlist is exhausted or the optional cap is reached.
async fn collect_video_ids(
    provider: &dyn MetadataProvider,
    playlist_id: &str,
    max_videos: Option<usize>,
) -> Result<Vec<String>, ProviderError> {
    let mut video_ids: Vec<String> = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = provider
            .list_playlist_items(playlist_id, page_token.as_deref())
            .await?;

        for item in &page.items {
            if let Some(vid) = item.video_id() {
                video_ids.push(vid.to_string());
                if max_videos.is_some_and(|max| video_ids.len() >= max) {
                    return Ok(video_ids);
                }
            }
        }

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(video_ids)
}

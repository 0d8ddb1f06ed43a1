use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::info;

use shared_utils::layout::{DataLayout, Dataset};
use yt_ingestor::models::RawChannel;

use crate::errors::Error;
use crate::io;
use crate::transform::{date_column, datetime_column, parse_count, parse_timestamp, read_raw_items};

/// Flattens the most recent raw channel partition into the staged
/// channel snapshot, overwriting `staging/channels/channels.parquet`.
///
/// The `snapshot_date` of every row is the partition's run date.
/// Returns the path of the parquet file.
pub fn transform_channels(layout: &DataLayout) -> Result<PathBuf, Error> {
    let run_date = layout.latest_run_date(Dataset::Channels)?;
    let raw_file = layout.raw_file(Dataset::Channels, run_date);
    if !raw_file.is_file() {
        return Err(Error::MissingInput(raw_file));
    }

    info!(path = %raw_file.display(), "reading raw channels");
    let items: Vec<RawChannel> = read_raw_items(&raw_file)?;
    let n = items.len();

    let mut channel_id: Vec<Option<String>> = Vec::with_capacity(n);
    let mut channel_title: Vec<Option<String>> = Vec::with_capacity(n);
    let mut channel_description: Vec<Option<String>> = Vec::with_capacity(n);
    let mut channel_published_at: Vec<Option<NaiveDateTime>> = Vec::with_capacity(n);
    let mut country: Vec<Option<String>> = Vec::with_capacity(n);
    let mut view_count: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut subscriber_count: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut hidden_subscriber_count: Vec<Option<bool>> = Vec::with_capacity(n);
    let mut video_count: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut uploads_playlist_id: Vec<Option<String>> = Vec::with_capacity(n);
    let snapshot_date: Vec<NaiveDate> = vec![run_date; n];

    for item in items {
        let uploads = item.uploads_playlist_id().map(str::to_string);
        let snippet = item.snippet.unwrap_or_default();
        let stats = item.statistics.unwrap_or_default();

        channel_id.push(item.id);
        channel_title.push(snippet.title);
        channel_description.push(snippet.description);
        channel_published_at.push(parse_timestamp(snippet.published_at.as_deref()));
        country.push(snippet.country);
        view_count.push(parse_count(stats.view_count.as_deref()));
        subscriber_count.push(parse_count(stats.subscriber_count.as_deref()));
        hidden_subscriber_count.push(stats.hidden_subscriber_count);
        video_count.push(parse_count(stats.video_count.as_deref()));
        uploads_playlist_id.push(uploads);
    }

    let mut df = DataFrame::new(vec![
        Column::new("channel_id".into(), channel_id),
        Column::new("channel_title".into(), channel_title),
        Column::new("channel_description".into(), channel_description),
        datetime_column("channel_published_at", &channel_published_at)?,
        Column::new("country".into(), country),
        Column::new("view_count".into(), view_count),
        Column::new("subscriber_count".into(), subscriber_count),
        Column::new("hidden_subscriber_count".into(), hidden_subscriber_count),
        Column::new("video_count".into(), video_count),
        Column::new("uploads_playlist_id".into(), uploads_playlist_id),
        date_column("snapshot_date", &snapshot_date)?,
    ])?;

    let out_path = layout.staging_file(Dataset::Channels);
    io::write_parquet(&mut df, &out_path)?;
    info!(rows = n, path = %out_path.display(), "wrote staged channels");
    Ok(out_path)
}

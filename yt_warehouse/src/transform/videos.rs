use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use iso8601_duration::Duration as IsoDuration;
use polars::prelude::*;
use tracing::info;

use shared_utils::layout::{DataLayout, Dataset};
use yt_ingestor::models::RawVideo;

use crate::errors::Error;
use crate::io;
use crate::transform::{date_column, datetime_column, parse_count, parse_timestamp, read_raw_items};

/// Flattens the most recent raw video partition into the staged video
/// snapshot, overwriting `staging/videos/videos.parquet`.
///
/// Returns the path of the parquet file.
pub fn transform_videos(layout: &DataLayout) -> Result<PathBuf, Error> {
    let run_date = layout.latest_run_date(Dataset::Videos)?;
    let raw_file = layout.raw_file(Dataset::Videos, run_date);
    if !raw_file.is_file() {
        return Err(Error::MissingInput(raw_file));
    }

    info!(path = %raw_file.display(), "reading raw videos");
    let items: Vec<RawVideo> = read_raw_items(&raw_file)?;
    let n = items.len();

    let mut video_id: Vec<Option<String>> = Vec::with_capacity(n);
    let mut channel_id: Vec<Option<String>> = Vec::with_capacity(n);
    let mut video_title: Vec<Option<String>> = Vec::with_capacity(n);
    let mut video_description: Vec<Option<String>> = Vec::with_capacity(n);
    let mut published_at: Vec<Option<NaiveDateTime>> = Vec::with_capacity(n);
    let mut category_id: Vec<Option<String>> = Vec::with_capacity(n);
    let mut duration_seconds: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut definition: Vec<Option<String>> = Vec::with_capacity(n);
    let mut caption: Vec<Option<String>> = Vec::with_capacity(n);
    let mut licensed_content: Vec<Option<bool>> = Vec::with_capacity(n);
    let mut view_count: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut like_count: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut favorite_count: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut comment_count: Vec<Option<i64>> = Vec::with_capacity(n);
    let snapshot_date: Vec<NaiveDate> = vec![run_date; n];

    for item in items {
        let snippet = item.snippet.unwrap_or_default();
        let stats = item.statistics.unwrap_or_default();
        let content = item.content_details.unwrap_or_default();

        video_id.push(item.id);
        channel_id.push(snippet.channel_id);
        video_title.push(snippet.title);
        video_description.push(snippet.description);
        published_at.push(parse_timestamp(snippet.published_at.as_deref()));
        category_id.push(snippet.category_id);
        duration_seconds.push(parse_duration_seconds(content.duration.as_deref()));
        definition.push(content.definition);
        caption.push(content.caption);
        licensed_content.push(content.licensed_content);
        view_count.push(parse_count(stats.view_count.as_deref()));
        like_count.push(parse_count(stats.like_count.as_deref()));
        favorite_count.push(parse_count(stats.favorite_count.as_deref()));
        comment_count.push(parse_count(stats.comment_count.as_deref()));
    }

    let mut df = DataFrame::new(vec![
        Column::new("video_id".into(), video_id),
        Column::new("channel_id".into(), channel_id),
        Column::new("video_title".into(), video_title),
        Column::new("video_description".into(), video_description),
        datetime_column("published_at", &published_at)?,
        Column::new("category_id".into(), category_id),
        Column::new("duration_seconds".into(), duration_seconds),
        Column::new("definition".into(), definition),
        Column::new("caption".into(), caption),
        Column::new("licensed_content".into(), licensed_content),
        Column::new("view_count".into(), view_count),
        Column::new("like_count".into(), like_count),
        Column::new("favorite_count".into(), favorite_count),
        Column::new("comment_count".into(), comment_count),
        date_column("snapshot_date", &snapshot_date)?,
    ])?;

    let out_path = layout.staging_file(Dataset::Videos);
    io::write_parquet(&mut df, &out_path)?;
    info!(rows = n, path = %out_path.display(), "wrote staged videos");
    Ok(out_path)
}

/// Parses an ISO-8601 duration into seconds. Absent, empty or malformed
/// durations become null instead of failing the run.
fn parse_duration_seconds(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let d = IsoDuration::parse(raw).ok()?;
    if d.year != 0.0 || d.month != 0.0 {
        // Months and years have no fixed length in seconds.
        return None;
    }
    Some(
        f64::from(d.day) * 86_400.0
            + f64::from(d.hour) * 3_600.0
            + f64::from(d.minute) * 60.0
            + f64::from(d.second),
    )
}

#[cfg(test)]
mod tests {
    use super::parse_duration_seconds;

    #[test]
    fn durations_convert_to_seconds() {
        assert_eq!(parse_duration_seconds(Some("PT1H2M3S")), Some(3723.0));
        assert_eq!(parse_duration_seconds(Some("PT3M33S")), Some(213.0));
        assert_eq!(parse_duration_seconds(Some("PT42S")), Some(42.0));
        assert_eq!(parse_duration_seconds(Some("P1DT1S")), Some(86_401.0));
    }

    #[test]
    fn bad_durations_become_null() {
        assert_eq!(parse_duration_seconds(None), None);
        assert_eq!(parse_duration_seconds(Some("")), None);
        assert_eq!(parse_duration_seconds(Some("garbage")), None);
        // Calendar-relative durations are indeterminate.
        assert_eq!(parse_duration_seconds(Some("P1M")), None);
    }
}

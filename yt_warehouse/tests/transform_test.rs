use std::fs;

use chrono::{DateTime, NaiveDate};
use polars::prelude::*;
use serde_json::json;

use shared_utils::layout::{DataLayout, Dataset};
use yt_warehouse::errors::Error;
use yt_warehouse::io::read_parquet;
use yt_warehouse::transform::{transform_channels, transform_videos};

fn write_partition(layout: &DataLayout, dataset: Dataset, run_date: &str, body: &str) {
    let date: NaiveDate = run_date.parse().unwrap();
    let path = layout.raw_file(dataset, date);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn days_since_epoch(s: &str) -> i32 {
    let d: NaiveDate = s.parse().unwrap();
    yt_warehouse::transform::days_since_epoch(d)
}

fn col_series(df: &DataFrame, name: &str) -> Series {
    df.column(name).unwrap().as_materialized_series().clone()
}

fn col_i64(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    col_series(df, name).i64().unwrap().into_iter().collect()
}

fn col_str(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    col_series(df, name)
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

#[test]
fn transform_channels_flattens_the_latest_partition() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(tmp.path());

    // An older partition that must be ignored.
    let stale = json!([{ "id": "STALE", "snippet": { "title": "old" } }]);
    write_partition(
        &layout,
        Dataset::Channels,
        "2024-02-01",
        &stale.to_string(),
    );

    let latest = json!([
        {
            "kind": "youtube#channel",
            "id": "C1",
            "snippet": {
                "title": "Channel One",
                "description": "first",
                "publishedAt": "2007-08-23T00:34:43Z",
                "country": "US"
            },
            "statistics": {
                "viewCount": "1000",
                "subscriberCount": "100",
                "hiddenSubscriberCount": false,
                "videoCount": "10"
            },
            "contentDetails": { "relatedPlaylists": { "uploads": "UUC1" } }
        },
        {
            "id": "C2",
            "snippet": { "title": "Channel Two", "publishedAt": "not-a-date" }
        }
    ]);
    write_partition(
        &layout,
        Dataset::Channels,
        "2024-03-01",
        &latest.to_string(),
    );

    let out = transform_channels(&layout).unwrap();
    assert_eq!(out, layout.staging_file(Dataset::Channels));

    let df = read_parquet(&out).unwrap();
    assert_eq!(df.height(), 2);
    assert_eq!(
        col_str(&df, "channel_id"),
        vec![Some("C1".to_string()), Some("C2".to_string())]
    );
    assert_eq!(col_i64(&df, "view_count"), vec![Some(1000), None]);
    assert_eq!(col_i64(&df, "subscriber_count"), vec![Some(100), None]);
    assert_eq!(
        col_str(&df, "uploads_playlist_id"),
        vec![Some("UUC1".to_string()), None]
    );

    // snapshot_date comes from the partition name.
    let snap: Vec<Option<i32>> = col_series(&df, "snapshot_date")
        .cast(&DataType::Int32)
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(snap, vec![Some(days_since_epoch("2024-03-01")); 2]);

    // A valid timestamp parses; a malformed one becomes null.
    let published: Vec<Option<i64>> = col_series(&df, "channel_published_at")
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    let expected = DateTime::parse_from_rfc3339("2007-08-23T00:34:43Z")
        .unwrap()
        .naive_utc()
        .and_utc()
        .timestamp_micros();
    assert_eq!(published, vec![Some(expected), None]);
}

#[test]
fn transform_videos_converts_durations_and_counts() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(tmp.path());

    let raw = json!([
        {
            "id": "V1",
            "snippet": { "channelId": "C1", "title": "one", "categoryId": "10" },
            "contentDetails": {
                "duration": "PT1H2M3S",
                "definition": "hd",
                "caption": "false",
                "licensedContent": true
            },
            "statistics": { "viewCount": "42", "likeCount": "7", "favoriteCount": "0" }
        },
        {
            "id": "V2",
            "snippet": { "channelId": "C1" },
            "contentDetails": { "duration": "" }
        },
        {
            "id": "V3",
            "snippet": { "channelId": "C1" },
            "contentDetails": { "duration": "borked" }
        }
    ]);
    write_partition(&layout, Dataset::Videos, "2024-03-01", &raw.to_string());

    let out = transform_videos(&layout).unwrap();
    let df = read_parquet(&out).unwrap();
    assert_eq!(df.height(), 3);

    let durations: Vec<Option<f64>> = col_series(&df, "duration_seconds")
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(durations, vec![Some(3723.0), None, None]);

    assert_eq!(col_i64(&df, "view_count"), vec![Some(42), None, None]);
    // Present-but-zero stays zero, not null.
    assert_eq!(col_i64(&df, "favorite_count"), vec![Some(0), None, None]);
    assert_eq!(col_i64(&df, "comment_count"), vec![None, None, None]);
}

#[test]
fn transform_fails_without_raw_partitions() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(tmp.path());
    assert!(matches!(
        transform_channels(&layout),
        Err(Error::Layout(_))
    ));
}

#[test]
fn transform_fails_when_the_partition_file_is_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(tmp.path());
    let date: NaiveDate = "2024-03-01".parse().unwrap();
    fs::create_dir_all(layout.raw_run_dir(Dataset::Channels, date)).unwrap();

    assert!(matches!(
        transform_channels(&layout),
        Err(Error::MissingInput(_))
    ));
    // Fatal before any partial write.
    assert!(!layout.staging_file(Dataset::Channels).exists());
}

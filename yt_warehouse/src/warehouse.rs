//! Warehouse builder: folds the staged snapshot history into
//! surrogate-keyed dimension tables and append-only daily fact tables.
//!
//! The build is a pure function of the staged parquet files: a stable
//! sort by `snapshot_date` plus stable last-write-wins deduplication per
//! natural key fixes each dimension's row order, dense 1-based surrogate
//! keys are assigned over that order, and every historical snapshot row
//! is left-joined back against its dimension to key the facts. Rebuilding
//! from identical staged inputs therefore reproduces identical tables.
//!
//! The builder reads whatever rows the staged files hold; accumulating
//! snapshots across runs is the responsibility of whoever feeds staging
//! (a single transform run overwrites staging with one day of data).
//!
//! All four outputs are overwritten whole on success. There is no
//! transactional guarantee across the four files: a failure mid-build
//! leaves previously written tables from the prior (or current) run on
//! disk.

use polars::prelude::*;
use tracing::info;

use shared_utils::layout::{DataLayout, Dataset};

use crate::errors::Error;
use crate::io;

pub const DIM_CHANNEL: &str = "dim_channel";
pub const DIM_VIDEO: &str = "dim_video";
pub const FCT_CHANNEL_DAILY_STATS: &str = "fct_channel_daily_stats";
pub const FCT_VIDEO_DAILY_STATS: &str = "fct_video_daily_stats";

/// The four warehouse tables, in build order.
pub const WAREHOUSE_TABLES: [&str; 4] = [
    DIM_CHANNEL,
    DIM_VIDEO,
    FCT_CHANNEL_DAILY_STATS,
    FCT_VIDEO_DAILY_STATS,
];

/// Builds the dimension and fact tables from the staged snapshots and
/// overwrites the four parquet files under `warehouse/`.
///
/// Fails with [`Error::MissingInput`] before writing anything if either
/// staged file is absent.
pub fn build_warehouse(layout: &DataLayout) -> Result<(), Error> {
    let channels_path = layout.staging_file(Dataset::Channels);
    let videos_path = layout.staging_file(Dataset::Videos);
    if !channels_path.is_file() {
        return Err(Error::MissingInput(channels_path));
    }
    if !videos_path.is_file() {
        return Err(Error::MissingInput(videos_path));
    }

    // Re-coerce snapshot_date to a pure date in case of serialization
    // drift in the staged files.
    let ch = io::read_parquet(&channels_path)?
        .lazy()
        .with_column(col("snapshot_date").cast(DataType::Date));
    let vd = io::read_parquet(&videos_path)?
        .lazy()
        .with_column(col("snapshot_date").cast(DataType::Date));

    // dim_channel: one row per channel, latest snapshot wins, dense
    // 1-based surrogate keys over the post-dedup row order.
    let mut dim_channel = latest_per_key(ch.clone(), "channel_id")
        .with_row_index("channel_key", Some(1))
        .with_column(col("channel_key").cast(DataType::Int64))
        .select([
            col("channel_key"),
            col("channel_id"),
            col("channel_title"),
            col("channel_description"),
            col("channel_published_at"),
            col("country"),
            col("view_count"),
            col("subscriber_count"),
            col("hidden_subscriber_count"),
            col("video_count"),
            col("uploads_playlist_id"),
        ])
        .collect()?;

    let channel_keys = dim_channel
        .clone()
        .lazy()
        .select([col("channel_key"), col("channel_id")]);

    // dim_video: same dedup keyed by video_id; channel_key resolved by a
    // left join, so an unknown channel_id yields a null key, not an error.
    let mut dim_video = latest_per_key(vd.clone(), "video_id")
        .with_row_index("video_key", Some(1))
        .with_column(col("video_key").cast(DataType::Int64))
        .join(
            channel_keys.clone(),
            [col("channel_id")],
            [col("channel_id")],
            JoinArgs::new(JoinType::Left),
        )
        .sort(["video_key"], SortMultipleOptions::default())
        .select([
            col("video_key"),
            col("video_id"),
            col("channel_key"),
            col("video_title"),
            col("video_description"),
            col("published_at"),
            col("category_id"),
            col("duration_seconds"),
            col("definition"),
            col("caption"),
            col("licensed_content"),
            col("view_count"),
            col("like_count"),
            col("favorite_count"),
            col("comment_count"),
        ])
        .collect()?;

    let video_keys = dim_video
        .clone()
        .lazy()
        .select([col("video_key"), col("video_id")]);

    // Facts: the full, non-deduplicated snapshot history keyed against
    // the dimensions. Left joins preserve every input row.
    let mut fct_channel = ch
        .join(
            channel_keys,
            [col("channel_id")],
            [col("channel_id")],
            JoinArgs::new(JoinType::Left),
        )
        .select([
            col("snapshot_date"),
            col("channel_key"),
            col("view_count"),
            col("subscriber_count"),
            col("video_count"),
        ])
        .sort(["channel_key", "snapshot_date"], SortMultipleOptions::default())
        .collect()?;

    let mut fct_video = vd
        .join(
            video_keys,
            [col("video_id")],
            [col("video_id")],
            JoinArgs::new(JoinType::Left),
        )
        .select([
            col("snapshot_date"),
            col("video_key"),
            col("view_count"),
            col("like_count"),
            col("comment_count"),
            col("favorite_count"),
        ])
        .sort(["video_key", "snapshot_date"], SortMultipleOptions::default())
        .collect()?;

    for (table, df) in [
        (DIM_CHANNEL, &mut dim_channel),
        (DIM_VIDEO, &mut dim_video),
        (FCT_CHANNEL_DAILY_STATS, &mut fct_channel),
        (FCT_VIDEO_DAILY_STATS, &mut fct_video),
    ] {
        let path = layout.warehouse_file(table);
        io::write_parquet(df, &path)?;
        info!(table, rows = df.height(), path = %path.display(), "wrote warehouse table");
    }

    Ok(())
}

/// Stable sort by `snapshot_date`, then keep each key's last (most
/// recent) row. Ties on snapshot_date resolve to the later input row.
fn latest_per_key(lf: LazyFrame, key: &str) -> LazyFrame {
    lf.sort(
        ["snapshot_date"],
        SortMultipleOptions::default().with_maintain_order(true),
    )
    .unique_stable(Some(vec![key.into()]), UniqueKeepStrategy::Last)
}

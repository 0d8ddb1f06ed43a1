//! Staging transformers: locate the most recent raw run-date partition,
//! flatten the nested API items into one flat row per entity, and
//! overwrite the staged parquet snapshot for that entity type.
//!
//! Data-quality anomalies (unparsable count, timestamp or duration) are
//! downgraded to nulls; only a missing raw file or partition aborts the
//! stage.

mod channels;
mod videos;

pub use channels::transform_channels;
pub use videos::transform_videos;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::de::DeserializeOwned;

use crate::errors::Error;

fn read_raw_items<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, Error> {
    let file = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(file)?)
}

/// String-typed API counts become Int64; absent or unparsable values
/// become null. A present-but-zero count and an absent one are not
/// distinguished downstream.
fn parse_count(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse::<i64>().ok())
}

/// Permissive RFC 3339 timestamp parsing; anything else becomes null.
fn parse_timestamp(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?;
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc())
}

/// Builds a non-nullable `Date` column from run dates.
fn date_column(name: &str, values: &[NaiveDate]) -> PolarsResult<Column> {
    let days: Vec<i32> = values.iter().map(|d| days_since_epoch(*d)).collect();
    Column::new(name.into(), days).cast(&DataType::Date)
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date");
    date.signed_duration_since(epoch).num_days() as i32
}

/// Builds a nullable microsecond `Datetime` column.
fn datetime_column(name: &str, values: &[Option<NaiveDateTime>]) -> PolarsResult<Column> {
    let micros: Vec<Option<i64>> = values
        .iter()
        .map(|v| v.map(|dt| dt.and_utc().timestamp_micros()))
        .collect();
    Column::new(name.into(), micros).cast(&DataType::Datetime(TimeUnit::Microseconds, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_coerce_or_null() {
        assert_eq!(parse_count(Some("12345")), Some(12345));
        assert_eq!(parse_count(Some("0")), Some(0));
        assert_eq!(parse_count(Some("not-a-number")), None);
        assert_eq!(parse_count(None), None);
    }

    #[test]
    fn timestamps_parse_permissively() {
        let ts = parse_timestamp(Some("2012-10-01T15:27:35Z")).unwrap();
        assert_eq!(ts.to_string(), "2012-10-01 15:27:35");
        assert_eq!(parse_timestamp(Some("october first")), None);
        assert_eq!(parse_timestamp(None), None);
    }

    #[test]
    fn date_column_round_trips_through_polars() {
        let d: NaiveDate = "2024-03-01".parse().unwrap();
        let col = date_column("snapshot_date", &[d]).unwrap();
        assert_eq!(col.dtype(), &DataType::Date);
        let physical = col
            .as_materialized_series()
            .cast(&DataType::Int32)
            .unwrap();
        let days = physical.i32().unwrap().get(0).unwrap();
        assert_eq!(days, days_since_epoch(d));
    }

    #[test]
    fn epoch_day_zero_is_1970() {
        assert_eq!(
            days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
            0
        );
        assert_eq!(days_since_epoch("1970-01-02".parse().unwrap()), 1);
        assert_eq!(days_since_epoch("1969-12-31".parse().unwrap()), -1);
    }
}

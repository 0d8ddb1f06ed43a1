//! On-disk layout of the pipeline's data directory.
//!
//! Every stage receives a [`DataLayout`] instead of reading ambient path
//! constants, so tests (and anyone running several copies of the pipeline)
//! can point a run at an arbitrary base directory:
//!
//! ```text
//! <root>/raw/channels/run_date=YYYY-MM-DD/channels.json
//! <root>/raw/videos/run_date=YYYY-MM-DD/videos.json
//! <root>/staging/{channels,videos}/{channels,videos}.parquet
//! <root>/warehouse/{dim_*,fct_*}.parquet
//! <root>/warehouse/csv/*.csv
//! ```
//!
//! Raw partitions are immutable once written; staging and warehouse files
//! are overwritten whole on every run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

/// Prefix of raw run-date partition directories.
const RUN_DATE_PREFIX: &str = "run_date=";

#[derive(Debug, Error)]
pub enum LayoutError {
    /// The raw root for a dataset does not exist.
    #[error("raw data root does not exist: {}", .0.display())]
    MissingRoot(PathBuf),

    /// The raw root exists but holds no `run_date=...` partition.
    #[error("no run_date=... partitions found under {}", .0.display())]
    NoRunPartitions(PathBuf),

    /// A partition directory name did not carry a valid ISO date.
    #[error("invalid run_date partition name: {0}")]
    InvalidPartition(String),

    #[error("I/O error while scanning partitions")]
    Io(#[from] std::io::Error),
}

/// The two raw/staged entity types the pipeline tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Channels,
    Videos,
}

impl Dataset {
    /// Directory and file stem used for this dataset on disk.
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Channels => "channels",
            Dataset::Videos => "videos",
        }
    }
}

/// Path builders for the raw / staging / warehouse trees under one base dir.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/raw/<dataset>`
    pub fn raw_root(&self, dataset: Dataset) -> PathBuf {
        self.root.join("raw").join(dataset.name())
    }

    /// `<root>/raw/<dataset>/run_date=YYYY-MM-DD`
    pub fn raw_run_dir(&self, dataset: Dataset, run_date: NaiveDate) -> PathBuf {
        self.raw_root(dataset)
            .join(format!("{RUN_DATE_PREFIX}{run_date}"))
    }

    /// `<root>/raw/<dataset>/run_date=YYYY-MM-DD/<dataset>.json`
    pub fn raw_file(&self, dataset: Dataset, run_date: NaiveDate) -> PathBuf {
        self.raw_run_dir(dataset, run_date)
            .join(format!("{}.json", dataset.name()))
    }

    /// `<root>/staging/<dataset>/<dataset>.parquet`
    pub fn staging_file(&self, dataset: Dataset) -> PathBuf {
        self.root
            .join("staging")
            .join(dataset.name())
            .join(format!("{}.parquet", dataset.name()))
    }

    /// `<root>/warehouse`
    pub fn warehouse_dir(&self) -> PathBuf {
        self.root.join("warehouse")
    }

    /// `<root>/warehouse/<table>.parquet`
    pub fn warehouse_file(&self, table: &str) -> PathBuf {
        self.warehouse_dir().join(format!("{table}.parquet"))
    }

    /// `<root>/warehouse/csv`
    pub fn csv_dir(&self) -> PathBuf {
        self.warehouse_dir().join("csv")
    }

    /// Finds the most recent `run_date=YYYY-MM-DD` partition for a dataset.
    ///
    /// "Most recent" is the lexicographically greatest directory name, which
    /// is date-order-correct for ISO dates. Fails if the raw root is missing
    /// or holds no partition directories.
    pub fn latest_run_date(&self, dataset: Dataset) -> Result<NaiveDate, LayoutError> {
        let root = self.raw_root(dataset);
        if !root.is_dir() {
            return Err(LayoutError::MissingRoot(root));
        }

        let mut latest: Option<String> = None;
        for entry in fs::read_dir(&root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(RUN_DATE_PREFIX) {
                continue;
            }
            if latest.as_deref().is_none_or(|cur| name.as_str() > cur) {
                latest = Some(name);
            }
        }

        let name = latest.ok_or(LayoutError::NoRunPartitions(root))?;
        let date_part = &name[RUN_DATE_PREFIX.len()..];
        date_part
            .parse::<NaiveDate>()
            .map_err(|_| LayoutError::InvalidPartition(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn paths_follow_the_partitioned_layout() {
        let layout = DataLayout::new("data");
        assert_eq!(
            layout.raw_file(Dataset::Channels, date("2024-01-02")),
            PathBuf::from("data/raw/channels/run_date=2024-01-02/channels.json")
        );
        assert_eq!(
            layout.staging_file(Dataset::Videos),
            PathBuf::from("data/staging/videos/videos.parquet")
        );
        assert_eq!(
            layout.warehouse_file("dim_channel"),
            PathBuf::from("data/warehouse/dim_channel.parquet")
        );
        assert_eq!(layout.csv_dir(), PathBuf::from("data/warehouse/csv"));
    }

    #[test]
    fn latest_run_date_picks_lexicographic_max() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(tmp.path());
        let root = layout.raw_root(Dataset::Channels);
        for d in ["2024-01-09", "2024-01-10", "2023-12-31"] {
            fs::create_dir_all(root.join(format!("run_date={d}"))).unwrap();
        }
        // Non-partition clutter is ignored.
        fs::create_dir_all(root.join("scratch")).unwrap();

        assert_eq!(
            layout.latest_run_date(Dataset::Channels).unwrap(),
            date("2024-01-10")
        );
    }

    #[test]
    fn latest_run_date_errors_when_root_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(tmp.path());
        assert!(matches!(
            layout.latest_run_date(Dataset::Videos),
            Err(LayoutError::MissingRoot(_))
        ));
    }

    #[test]
    fn latest_run_date_errors_without_partitions() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(tmp.path());
        fs::create_dir_all(layout.raw_root(Dataset::Videos)).unwrap();
        assert!(matches!(
            layout.latest_run_date(Dataset::Videos),
            Err(LayoutError::NoRunPartitions(_))
        ));
    }
}

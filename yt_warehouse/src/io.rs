//! Whole-file dataframe I/O.
//!
//! Every writer here overwrites its target in place after creating the
//! parent directory; nothing merges with prior contents. There is no
//! cross-process locking, so concurrent pipelines against one data
//! directory are last-writer-wins.

use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;

use crate::errors::Error;

pub fn read_parquet(path: &Path) -> Result<DataFrame, Error> {
    let file = File::open(path)?;
    Ok(ParquetReader::new(file).finish()?)
}

pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    ParquetWriter::new(file).finish(df)?;
    Ok(())
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    CsvWriter::new(file).finish(df)?;
    Ok(())
}

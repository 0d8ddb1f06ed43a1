//! Read-only SQL analysis over the warehouse tables.
//!
//! An in-memory [`SQLContext`] exposes the four warehouse parquet files
//! as lazy views under their table names; queries come from external
//! `.sql` files and results are previewed on stdout.

use std::fs;
use std::path::Path;

use polars::prelude::*;
use polars::sql::SQLContext;
use tracing::info;

use shared_utils::layout::DataLayout;

use crate::errors::Error;
use crate::warehouse::WAREHOUSE_TABLES;

/// Number of rows previewed per query result.
const PREVIEW_ROWS: usize = 20;

/// Opens an in-memory SQL context with all four warehouse tables
/// registered as lazy parquet scans. Fails if any table file is absent.
pub fn open_context(layout: &DataLayout) -> Result<SQLContext, Error> {
    let mut ctx = SQLContext::new();
    for table in WAREHOUSE_TABLES {
        let path = layout.warehouse_file(table);
        if !path.is_file() {
            return Err(Error::MissingInput(path));
        }
        ctx.register(table, LazyFrame::scan_parquet(&path, ScanArgsParquet::default())?);
    }
    Ok(ctx)
}

/// Executes the query in `sql_path` against the context, printing a
/// row preview and the total row count. Returns the full result.
pub fn run_sql_file(ctx: &mut SQLContext, sql_path: &Path) -> Result<DataFrame, Error> {
    if !sql_path.is_file() {
        return Err(Error::MissingInput(sql_path.to_path_buf()));
    }
    let query = fs::read_to_string(sql_path)?;

    info!(path = %sql_path.display(), "running query");
    let df = ctx.execute(&query)?.collect()?;

    println!("{}", df.head(Some(PREVIEW_ROWS)));
    println!("Total rows: {}", df.height());
    Ok(df)
}

//! One-to-one CSV mirror of the warehouse tables.

use tracing::info;

use shared_utils::layout::DataLayout;

use crate::errors::Error;
use crate::io;
use crate::warehouse::WAREHOUSE_TABLES;

/// Mirrors each warehouse parquet file to `warehouse/csv/<table>.csv`,
/// overwriting any prior export. Fails if a table file is absent.
pub fn export_warehouse_to_csv(layout: &DataLayout) -> Result<(), Error> {
    for table in WAREHOUSE_TABLES {
        let src = layout.warehouse_file(table);
        if !src.is_file() {
            return Err(Error::MissingInput(src));
        }
        let mut df = io::read_parquet(&src)?;

        let dst = layout.csv_dir().join(format!("{table}.csv"));
        io::write_csv(&mut df, &dst)?;
        info!(table, rows = df.height(), path = %dst.display(), "exported table");
    }
    Ok(())
}

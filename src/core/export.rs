//! CSV export of flattened report rows.
//!
//! Any row type that serializes to a flat record can be written; the header
//! line comes from its field names.

use crate::core::green_book::GreenBookRow;
use crate::errors::Result;
use serde::Serialize;
use std::{io::Write, path::Path};
use tracing::info;

/// Writes rows as CSV with a header line.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the green book to a CSV file.
pub fn write_green_book<P: AsRef<Path>>(path: P, rows: &[GreenBookRow]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_csv(file, rows)?;
    info!("Wrote {} green book rows to {}", rows.len(), path.display());
    Ok(())
}
